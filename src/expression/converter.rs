use log::debug;

use crate::error::ExpressionError;
use crate::expression::Token;
use crate::functions::{Associativity, Operation, Registry};

/// Shunting-yard conversion of resolved infix tokens to postfix order.
///
/// Prefix functions wait on the operator stack and are flushed by the next
/// infix operator or by the end of input. Postfix operators go straight to
/// the output, after the operand they apply to. Power is right-associative;
/// every other infix operator, comparisons included, is left-associative.
pub fn to_postfix(tokens: &[Token], registry: &Registry) -> Result<Vec<Token>, ExpressionError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<&Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token.clone()),
            Token::LeftParen => stack.push(token),
            Token::RightParen => {
                while let Some(top) = stack.pop() {
                    if *top == Token::LeftParen {
                        break;
                    }
                    output.push(top.clone());
                }
            }
            Token::Comma => {
                // flush the finished argument, keeping the call's `(`
                while let Some(top) = stack.last() {
                    if **top == Token::LeftParen {
                        break;
                    }
                    output.push((*top).clone());
                    stack.pop();
                }
            }
            Token::Identifier(name) | Token::Operator(name) => match registry.get(name) {
                Some(Operation::Constant(_)) | Some(Operation::Postfix(_)) => {
                    output.push(token.clone())
                }
                Some(operation) if operation.is_prefix_function() => stack.push(token),
                Some(Operation::Infix {
                    precedence,
                    associativity,
                    ..
                }) => {
                    while let Some(top) = stack.last() {
                        if !yields_to(top, *precedence, *associativity, registry) {
                            break;
                        }
                        output.push((*top).clone());
                        stack.pop();
                    }
                    stack.push(token);
                }
                _ => return Err(ExpressionError::UnknownOperation(name.clone())),
            },
            Token::Unknown(symbol) => {
                return Err(ExpressionError::UnknownOperation(symbol.clone()))
            }
        }
    }

    // an unclosed `(` has no postfix meaning
    output.extend(
        stack
            .into_iter()
            .rev()
            .filter(|token| **token != Token::LeftParen)
            .cloned(),
    );

    debug!("Postfix: {:?}", output);
    Ok(output)
}

/// Whether the stack top must be emitted before pushing an incoming infix operator.
fn yields_to(
    top: &Token,
    precedence: u8,
    associativity: Associativity,
    registry: &Registry,
) -> bool {
    if *top == Token::LeftParen {
        return false;
    }
    let name = top.as_str();
    if registry.is_prefix_function(name) {
        return true;
    }
    match registry.precedence(name) {
        Some(top_precedence) => {
            top_precedence > precedence
                || (top_precedence == precedence && associativity == Associativity::Left)
        }
        None => false,
    }
}
