//! Context-sensitive rewrites applied between the raw text and the converter.
//!
//! Each pass takes a token sequence and returns a new one. Passes only replace
//! tokens one for one or insert new tokens; surviving tokens keep their order.

use log::debug;

use crate::error::ExpressionError;
use crate::expression::{tokenize, Token};
use crate::functions::Registry;

/// Full resolver pipeline: constant split, tokenize, log arity, unary signs,
/// implicit multiplication. Later passes rely on the rewrites of earlier ones.
pub fn resolve(expression: &str, registry: &Registry) -> Result<Vec<Token>, ExpressionError> {
    let expression = split_adjacent_constants(expression, registry);
    let tokens = tokenize(&expression)?;
    let tokens = resolve_log_arity(&tokens);
    let tokens = resolve_unary(&tokens, registry);
    let tokens = insert_implicit_multiplication(&tokens, registry);
    debug!("Resolved tokens: {:?}", tokens);
    Ok(tokens)
}

/// Inserts a space between two constant names written back to back (`epi`).
///
/// Works on plain substrings, so a function name containing such a pair is
/// split too (`degrees` contains `ee`).
pub fn split_adjacent_constants(expression: &str, registry: &Registry) -> String {
    let names = registry.constant_names();
    let mut expression = expression.to_string();
    for first in &names {
        for second in &names {
            let joined = format!("{}{}", first, second);
            if expression.contains(&joined) {
                expression = expression.replace(&joined, &format!("{} {}", first, second));
            }
        }
    }
    expression
}

/// Rewrites `log` to `ln` unless its call has a second argument.
pub fn resolve_log_arity(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| match token {
            Token::Identifier(name)
                if name == "log" && !has_second_argument(&tokens[index + 1..]) =>
            {
                Token::Identifier("ln".to_string())
            }
            _ => token.clone(),
        })
        .collect()
}

/// Looks for a comma at the call's own nesting level before its closing paren.
fn has_second_argument(call: &[Token]) -> bool {
    let mut depth = 0usize;
    for token in call {
        match token {
            Token::LeftParen => depth += 1,
            Token::RightParen => depth = depth.saturating_sub(1),
            Token::Comma if depth == 1 => return true,
            _ => {}
        }
        if depth == 0 {
            break;
        }
    }
    false
}

/// Turns sign `-`/`+` into the `minus`/`plus` functions.
///
/// A sign stays binary only right after `)`, a constant or a number.
pub fn resolve_unary(tokens: &[Token], registry: &Registry) -> Vec<Token> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| match token {
            Token::Operator(sign) if sign == "-" || sign == "+" => {
                let binary = index > 0
                    && match &tokens[index - 1] {
                        Token::RightParen | Token::Number(_) => true,
                        Token::Identifier(name) => registry.is_constant(name),
                        _ => false,
                    };
                if binary {
                    token.clone()
                } else if sign == "-" {
                    Token::Identifier("minus".to_string())
                } else {
                    Token::Identifier("plus".to_string())
                }
            }
            _ => token.clone(),
        })
        .collect()
}

/// Makes juxtaposition explicit: `2pi`, `e pi`, `2(1+1)`, `(1)2`, `(1)sin(1)`.
pub fn insert_implicit_multiplication(tokens: &[Token], registry: &Registry) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        if index > 0 && multiplies(&tokens[index - 1], token, registry) {
            result.push(Token::Operator("*".to_string()));
        }
        result.push(token.clone());
    }
    result
}

fn multiplies(previous: &Token, current: &Token, registry: &Registry) -> bool {
    let is_constant =
        |token: &Token| matches!(token, Token::Identifier(name) if registry.is_constant(name));
    let is_callable_or_constant = |token: &Token| {
        matches!(token, Token::Identifier(name)
            if registry.is_prefix_function(name) || registry.is_constant(name))
    };

    match previous {
        Token::Number(_) => is_callable_or_constant(current) || *current == Token::LeftParen,
        Token::RightParen => is_callable_or_constant(current) || current.is_number(),
        _ => is_constant(previous) && is_constant(current),
    }
}
