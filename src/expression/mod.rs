use std::fmt;
use std::num::NonZeroUsize;

use log::debug;
use lru::LruCache;

use crate::error::ExpressionError;
use crate::functions::Registry;

mod converter;
mod evaluator;
mod resolver;
mod tokenizer;
mod validator;

pub use converter::to_postfix;
pub use evaluator::evaluate_postfix;
pub use resolver::{
    insert_implicit_multiplication, resolve, resolve_log_arity, resolve_unary,
    split_adjacent_constants,
};
pub use tokenizer::tokenize;
pub use validator::{
    check_operands, check_parentheses, check_spaces, check_symbols, validate,
};

/// A lexical token. Only the text and its position matter; whether an
/// identifier is a constant or a function is decided by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Number(String),
    Identifier(String),
    Operator(String),
    LeftParen,
    RightParen,
    Comma,
    /// A character no other token class accepts.
    Unknown(String),
}

impl Token {
    pub fn as_str(&self) -> &str {
        match self {
            Token::Number(text)
            | Token::Identifier(text)
            | Token::Operator(text)
            | Token::Unknown(text) => text,
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Comma => ",",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Boolean(bool),
}

impl Value {
    /// Numeric view of the value; booleans count as 1.0 and 0.0.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(value) => *value,
            Value::Boolean(true) => 1.0,
            Value::Boolean(false) => 0.0,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Boolean(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
        }
    }
}

/// Runs every check and rewrite up to the postfix form.
///
/// Order: validate the raw text, resolve (constant split, tokenize, log arity,
/// unary signs, implicit multiplication), require an operand, convert.
pub fn compile_expression(
    expression: &str,
    registry: &Registry,
) -> Result<Vec<Token>, ExpressionError> {
    debug!("Compiling expression: {}", expression);
    validate(expression)?;
    let tokens = resolve(expression, registry)?;
    check_operands(&tokens, registry)?;
    to_postfix(&tokens, registry)
}

/// Evaluates expressions against one registry, remembering the postfix form of
/// recently seen expressions.
pub struct Calculator<'r> {
    registry: &'r Registry,
    cache: Option<LruCache<String, Vec<Token>>>,
}

impl Calculator<'static> {
    /// Creates a calculator over the shared registry. A `cache_size` of zero
    /// disables the postfix cache.
    pub fn new(cache_size: usize) -> Self {
        Self::with_registry(Registry::global(), cache_size)
    }
}

impl<'r> Calculator<'r> {
    pub fn with_registry(registry: &'r Registry, cache_size: usize) -> Self {
        Self {
            registry,
            cache: NonZeroUsize::new(cache_size).map(LruCache::new),
        }
    }

    /// Postfix form of an expression, served from the cache when possible.
    pub fn compile(&mut self, expression: &str) -> Result<Vec<Token>, ExpressionError> {
        let registry = self.registry;
        match self.cache.as_mut() {
            Some(cache) => {
                if let Some(postfix) = cache.get(expression) {
                    return Ok(postfix.clone());
                }
                let postfix = compile_expression(expression, registry)?;
                cache.put(expression.to_string(), postfix.clone());
                Ok(postfix)
            }
            None => compile_expression(expression, registry),
        }
    }

    pub fn evaluate(&mut self, expression: &str) -> Result<Value, ExpressionError> {
        let registry = self.registry;
        if let Some(cache) = self.cache.as_mut() {
            if let Some(postfix) = cache.get(expression) {
                debug!("Postfix cache hit: {}", expression);
                return evaluate_postfix(postfix, registry);
            }
        }

        let postfix = self.compile(expression)?;
        evaluate_postfix(&postfix, registry)
    }

    pub fn cached_expressions(&self) -> usize {
        self.cache.as_ref().map_or(0, LruCache::len)
    }
}

#[cfg(test)]
pub(crate) fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(Token::as_str).collect()
}
