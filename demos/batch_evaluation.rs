use infixcalc_rs::evaluate_batch;

fn main() {
    pretty_env_logger::init();

    let expressions: Vec<String> = (1..=10).map(|n| format!("{}! / 2^{}", n, n)).collect();
    let borrowed: Vec<&str> = expressions.iter().map(String::as_str).collect();

    for (expression, result) in borrowed.iter().zip(evaluate_batch(&borrowed)) {
        match result {
            Ok(value) => println!("{} = {}", expression, value),
            Err(err) => println!("{}: ERROR: {}", expression, err),
        }
    }
}
