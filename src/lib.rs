pub mod error;
pub mod expression;
pub mod functions;

pub use error::ExpressionError;
pub use expression::{Calculator, Token, Value};
pub use functions::Registry;

use expression::{compile_expression, evaluate_postfix};
use rayon::prelude::*;

/// Evaluates a single-line infix expression against the shared registry.
pub fn evaluate_expression(expression: &str) -> Result<Value, ExpressionError> {
    let registry = Registry::global();
    let postfix = compile_expression(expression, registry)?;
    evaluate_postfix(&postfix, registry)
}

/// Evaluates independent expressions in parallel. Results keep input order.
pub fn evaluate_batch(expressions: &[&str]) -> Vec<Result<Value, ExpressionError>> {
    expressions
        .par_iter()
        .map(|expression| evaluate_expression(expression))
        .collect()
}
