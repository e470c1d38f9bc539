use infixcalc_rs::expression::{compile_expression, evaluate_postfix};
use infixcalc_rs::Registry;

fn main() {
    pretty_env_logger::init();

    let registry = Registry::global();
    let expression = "sqrt(3^2 + 4^2) == 5";
    let postfix = compile_expression(expression, registry).expect("Failed to compile");

    let rendered: Vec<String> = postfix.iter().map(ToString::to_string).collect();
    println!("Postfix: {}", rendered.join(" "));

    match evaluate_postfix(&postfix, registry) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
