use infixcalc_rs::{evaluate_expression, Value};
use log::debug;

fn main() {
    pretty_env_logger::init();

    let expressions = [
        "2+3*4",
        "2^3^2",
        "-sin(pi/2)",
        "2pi + log(8, 2)",
        "5!>=100",
        "5//0",
    ];

    for expression in expressions {
        match evaluate_expression(expression) {
            Ok(Value::Boolean(flag)) => println!("{} => {}", expression, flag),
            Ok(Value::Number(number)) => println!("{} => {}", expression, number),
            Err(err) => println!("{} => ERROR: {}", expression, err),
        }
        debug!("done with {}", expression);
    }
}
