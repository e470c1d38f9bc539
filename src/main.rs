use infixcalc_rs::evaluate_expression;
use log::debug;
use std::process::ExitCode;

const USAGE: &str = "usage: infixcalc <EXPRESSION>

Evaluates a single-line math expression, e.g. infixcalc \"2sin(pi/2) + log(8, 2)\"";

fn main() -> ExitCode {
    pretty_env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let expression = match args.as_slice() {
        [flag] if flag == "-h" || flag == "--help" => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        [expression] => expression,
        _ => {
            println!("ERROR: expected exactly one expression argument");
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    debug!("Evaluating {:?}", expression);
    match evaluate_expression(expression) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("ERROR: {}", err);
            ExitCode::FAILURE
        }
    }
}
