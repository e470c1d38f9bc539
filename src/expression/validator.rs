use log::debug;

use crate::error::ExpressionError;
use crate::expression::Token;
use crate::functions::Registry;

const FORBIDDEN_SYMBOLS: &[char] = &[
    ';', '@', '_', '#', '$', '&', '?', '|', '}', '{', '~', '"', ':',
];

/// Pre-flight checks over the raw expression: symbols, parentheses, spaces.
pub fn validate(expression: &str) -> Result<(), ExpressionError> {
    check_symbols(expression)?;
    check_parentheses(expression)?;
    check_spaces(expression)?;
    debug!("Validated expression: {}", expression);
    Ok(())
}

pub fn check_symbols(expression: &str) -> Result<(), ExpressionError> {
    match expression.chars().find(|c| FORBIDDEN_SYMBOLS.contains(c)) {
        Some(symbol) => Err(ExpressionError::UnknownSymbol(symbol)),
        None => Ok(()),
    }
}

pub fn check_parentheses(expression: &str) -> Result<(), ExpressionError> {
    let opened = expression.matches('(').count();
    let closed = expression.matches(')').count();

    if opened > closed {
        Err(ExpressionError::UnbalancedParentheses(format!(
            "expression has {} unclosed parentheses",
            opened - closed
        )))
    } else if closed > opened {
        Err(ExpressionError::UnbalancedParentheses(format!(
            "expression has {} redundant closing parentheses",
            closed - opened
        )))
    } else {
        Ok(())
    }
}

/// Rejects spaces that would split or obscure a number or an operator.
pub fn check_spaces(expression: &str) -> Result<(), ExpressionError> {
    let characters: Vec<char> = expression.chars().collect();

    for (index, character) in characters.iter().enumerate() {
        if *character != ' ' {
            continue;
        }
        let previous = index.checked_sub(1).map(|i| characters[i]);
        let next = characters.get(index + 1).copied();

        if let Some(message) = space_error(previous, next) {
            return Err(ExpressionError::UnexpectedSpace(message));
        }
    }
    Ok(())
}

fn space_error(previous: Option<char>, next: Option<char>) -> Option<String> {
    if previous == Some(' ') || next == Some(' ') {
        return Some("unexpected double space".to_string());
    }
    let (Some(previous), Some(next)) = (previous, next) else {
        return None;
    };

    if previous.is_ascii_digit() && next.is_ascii_digit() {
        Some("unexpected space between numbers".to_string())
    } else if (next == '.' && previous.is_ascii_digit())
        || (previous == '.' && next.is_ascii_digit())
    {
        Some("unexpected space between/or in fractional numbers".to_string())
    } else if "<>=!".contains(previous) && "<>=!".contains(next) {
        Some(format!(
            "unexpected space in comparison operation {}{}",
            previous, next
        ))
    } else if "*/^".contains(previous) && "*/^".contains(next) {
        Some(format!("unexpected space in operation {}{}", previous, next))
    } else if previous == '(' && next == ')' {
        Some("unexpected empty parentheses".to_string())
    } else if previous == ')' && next == '.' {
        Some("unexpected fractional number after \")\"".to_string())
    } else {
        None
    }
}

/// The resolved expression must contain at least one number or constant.
pub fn check_operands(tokens: &[Token], registry: &Registry) -> Result<(), ExpressionError> {
    let has_operand = tokens.iter().any(|token| match token {
        Token::Number(_) => true,
        Token::Identifier(name) => registry.is_constant(name),
        _ => false,
    });

    if has_operand {
        Ok(())
    } else {
        Err(ExpressionError::MissingOperand(
            "no numbers or constants in expression".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::resolve;

    #[test]
    fn test_check_parentheses() {
        assert_eq!(
            check_parentheses("8*(3+2))"),
            Err(ExpressionError::UnbalancedParentheses(
                "expression has 1 redundant closing parentheses".to_string()
            ))
        );
        assert_eq!(
            check_parentheses("((8*(3+2)"),
            Err(ExpressionError::UnbalancedParentheses(
                "expression has 2 unclosed parentheses".to_string()
            ))
        );
        assert!(check_parentheses("(8*(3+2))").is_ok());
    }

    #[test]
    fn test_check_symbols() {
        assert_eq!(
            check_symbols("8#(3+2))"),
            Err(ExpressionError::UnknownSymbol('#'))
        );
        assert_eq!(
            check_symbols("8+(3~2))"),
            Err(ExpressionError::UnknownSymbol('~'))
        );
        assert!(check_symbols("3 + 2").is_ok());
    }

    #[test]
    fn test_symbols_are_checked_before_parentheses() {
        assert_eq!(
            validate("8#(3+2))"),
            Err(ExpressionError::UnknownSymbol('#'))
        );
        assert!(matches!(
            validate("8*(3+2))"),
            Err(ExpressionError::UnbalancedParentheses(_))
        ));
    }

    #[test]
    fn test_check_spaces() {
        let rejected = [
            ("1 2", "unexpected space between numbers"),
            ("1  + 2", "unexpected double space"),
            ("8 > =  7", "unexpected space in comparison operation >="),
            ("5 / / 88", "unexpected space in operation //"),
            ("2 * * 3", "unexpected space in operation **"),
            ("1 .5", "unexpected space between/or in fractional numbers"),
            ("1. 5", "unexpected space between/or in fractional numbers"),
            ("sin( )", "unexpected empty parentheses"),
            ("(88) .3", "unexpected fractional number after \")\""),
        ];
        for (expression, message) in rejected {
            assert_eq!(
                check_spaces(expression),
                Err(ExpressionError::UnexpectedSpace(message.to_string())),
                "expression {:?}",
                expression
            );
        }
    }

    #[test]
    fn test_permitted_spaces() {
        for expression in ["11 + sin(13)", "3 + 2", " 1", "1 ", "2 < 3", "e pi"] {
            assert!(check_spaces(expression).is_ok(), "expression {:?}", expression);
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        for expression in ["1+2", "sin(pi) * 3", "log(8, 2)"] {
            assert!(validate(expression).is_ok());
            assert!(validate(expression).is_ok());
        }
    }

    #[test]
    fn test_check_operands() {
        let registry = Registry::global();
        let tokens = resolve("sin+cos", registry).unwrap();
        assert_eq!(
            check_operands(&tokens, registry),
            Err(ExpressionError::MissingOperand(
                "no numbers or constants in expression".to_string()
            ))
        );
        assert!(check_operands(&resolve("3+2", registry).unwrap(), registry).is_ok());
        assert!(check_operands(&resolve("-pi", registry).unwrap(), registry).is_ok());
        assert!(check_operands(&[], registry).is_err());
    }
}
