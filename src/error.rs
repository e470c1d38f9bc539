use thiserror::Error;

/// Every way an expression can fail, from pre-flight checks to evaluation.
///
/// The `Display` text is what the CLI prints after `ERROR: `.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("{0}")]
    UnbalancedParentheses(String),
    #[error("unknown symbols \"{0}\"")]
    UnknownSymbol(char),
    #[error("{0}")]
    UnexpectedSpace(String),
    #[error("{0}")]
    MissingOperand(String),
    #[error("expression has {0} redundant operands that no operation consumes")]
    RedundantOperand(usize),
    #[error("unknown operation \"{0}\"")]
    UnknownOperation(String),
    #[error("{0}")]
    Domain(String),
    #[error("can't divide by zero")]
    DivideByZero,
}

impl ExpressionError {
    pub(crate) fn domain(message: impl Into<String>) -> Self {
        ExpressionError::Domain(message.into())
    }
}
