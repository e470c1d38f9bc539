use log::{debug, trace};

use crate::error::ExpressionError;
use crate::expression::{Token, Value};
use crate::functions::{Operation, Registry};

/// Evaluates a postfix token sequence with a fresh value stack.
///
/// Constants push their value, anything the registry doesn't know is parsed
/// as a numeric literal, and operations pop as many operands as their arity
/// (top of stack is the right operand). Exactly one value must remain.
pub fn evaluate_postfix(postfix: &[Token], registry: &Registry) -> Result<Value, ExpressionError> {
    let mut stack = ValueStack::with_capacity(postfix.len());

    for token in postfix {
        let name = token.as_str();
        match registry.get(name) {
            None => stack.push(Value::Number(parse_operand(token)?)),
            Some(Operation::Constant(value)) => stack.push(Value::Number(*value)),
            Some(Operation::Infix { rule, .. }) => {
                let (left, right) = stack.pop_two(name)?;
                stack.push(rule(left, right)?);
            }
            Some(Operation::BinaryFunction(rule)) => {
                let (left, right) = stack.pop_two(name)?;
                stack.push(Value::Number(rule(left, right)?));
            }
            Some(Operation::UnaryFunction(rule)) | Some(Operation::Postfix(rule)) => {
                let operand = stack.pop_one(name)?;
                stack.push(Value::Number(rule(operand)?));
            }
        }
        trace!("{} -> {:?}", name, stack.values);
    }

    let result = stack.finish()?;
    debug!("Result: {}", result);
    Ok(result)
}

fn parse_operand(token: &Token) -> Result<f64, ExpressionError> {
    match token {
        Token::Number(text) => text
            .parse::<f64>()
            .map_err(|_| ExpressionError::UnknownOperation(text.clone())),
        other => Err(ExpressionError::UnknownOperation(other.to_string())),
    }
}

struct ValueStack {
    values: Vec<Value>,
}

impl ValueStack {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    fn pop_one(&mut self, operation: &str) -> Result<f64, ExpressionError> {
        self.values
            .pop()
            .map(|value| value.as_number())
            .ok_or_else(|| missing_operand(operation))
    }

    /// Pops `(left, right)`; the right operand is on top.
    fn pop_two(&mut self, operation: &str) -> Result<(f64, f64), ExpressionError> {
        let right = self.pop_one(operation)?;
        let left = self.pop_one(operation)?;
        Ok((left, right))
    }

    fn finish(self) -> Result<Value, ExpressionError> {
        match self.values.as_slice() {
            [value] => Ok(*value),
            [] => Err(ExpressionError::MissingOperand(
                "no numbers or constants in expression".to_string(),
            )),
            values => Err(ExpressionError::RedundantOperand(values.len() - 1)),
        }
    }
}

fn missing_operand(operation: &str) -> ExpressionError {
    ExpressionError::MissingOperand(format!(
        "not enough operands for \"{}\" operation",
        operation
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::compile_expression;

    fn postfix(texts: &[&str]) -> Vec<Token> {
        texts
            .iter()
            .map(|text| {
                if text.starts_with(|c: char| c.is_ascii_digit()) {
                    Token::Number(text.to_string())
                } else if text.starts_with(|c: char| c.is_ascii_alphabetic()) {
                    Token::Identifier(text.to_string())
                } else {
                    Token::Operator(text.to_string())
                }
            })
            .collect()
    }

    fn evaluate(texts: &[&str]) -> Result<Value, ExpressionError> {
        evaluate_postfix(&postfix(texts), Registry::global())
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(evaluate(&["2", "3", "4", "*", "+"]).unwrap(), Value::Number(14.0));
        assert_eq!(evaluate(&["8", "3", "-"]).unwrap(), Value::Number(5.0));
        assert_eq!(evaluate(&["2", "3", "2", "^", "^"]).unwrap(), Value::Number(512.0));
    }

    #[test]
    fn test_functions_and_constants() {
        let value = evaluate(&["pi", "2", "/", "sin", "minus"]).unwrap();
        assert!((value.as_number() + 1.0).abs() < 1e-12);
        let value = evaluate(&["8", "2", "log"]).unwrap();
        assert!((value.as_number() - 3.0).abs() < 1e-12);
        assert_eq!(evaluate(&["4", "!"]).unwrap(), Value::Number(24.0));
    }

    #[test]
    fn test_comparisons_yield_booleans() {
        assert_eq!(evaluate(&["1", "2", "<"]).unwrap(), Value::Boolean(true));
        assert_eq!(evaluate(&["1", "2", "=="]).unwrap(), Value::Boolean(false));
        // a boolean consumed by arithmetic counts as 1
        assert_eq!(evaluate(&["1", "2", "<", "1", "+"]).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            evaluate(&["2", "+"]),
            Err(ExpressionError::MissingOperand(
                "not enough operands for \"+\" operation".to_string()
            ))
        );
        assert!(matches!(
            evaluate(&["sin"]),
            Err(ExpressionError::MissingOperand(_))
        ));
        assert!(matches!(evaluate(&[]), Err(ExpressionError::MissingOperand(_))));
    }

    #[test]
    fn test_redundant_operand() {
        assert_eq!(
            evaluate(&["3", "2", "1", "+"]),
            Err(ExpressionError::RedundantOperand(1))
        );
        let registry = Registry::global();
        let tokens = crate::expression::resolve("3 + 2 1", registry).unwrap();
        let converted = crate::expression::to_postfix(&tokens, registry).unwrap();
        assert_eq!(
            evaluate_postfix(&converted, registry),
            Err(ExpressionError::RedundantOperand(1))
        );
    }

    #[test]
    fn test_unknown_operand() {
        assert_eq!(
            evaluate(&["foo"]),
            Err(ExpressionError::UnknownOperation("foo".to_string()))
        );
    }

    #[test]
    fn test_operation_errors_propagate() {
        assert_eq!(evaluate(&["5", "0", "/"]), Err(ExpressionError::DivideByZero));
        assert!(matches!(
            evaluate(&["3", "minus", "factorial"]),
            Err(ExpressionError::Domain(_))
        ));
    }

    #[test]
    fn test_evaluations_do_not_share_state() {
        let registry = Registry::global();
        let failing = compile_expression("5%0", registry).unwrap();
        assert!(evaluate_postfix(&failing, registry).is_err());
        let passing = compile_expression("5%3", registry).unwrap();
        assert_eq!(evaluate_postfix(&passing, registry).unwrap(), Value::Number(2.0));
    }
}
