use crate::error::ExpressionError;
use crate::expression::Token;
use log::debug;
use pest::error::InputLocation;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "./expression.pest"]
pub struct ExpressionTokenizer;

/// Splits a raw expression into tokens, keeping source order.
///
/// No classification against the registry happens here: `sin`, `pi` and
/// `foo` are all plain identifiers at this stage.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, ExpressionError> {
    let tokens = ExpressionTokenizer::parse(Rule::tokens, expression)
        .map_err(|error| {
            let position = match error.location {
                InputLocation::Pos(position) => position,
                InputLocation::Span((start, _)) => start,
            };
            match expression[position..].chars().next() {
                Some(symbol) => ExpressionError::UnknownSymbol(symbol),
                None => ExpressionError::MissingOperand("unexpected end of expression".to_string()),
            }
        })?
        .next()
        .ok_or_else(|| ExpressionError::MissingOperand("empty expression".to_string()))?
        .into_inner()
        .filter_map(|pair| {
            let text = pair.as_str().to_string();
            match pair.as_rule() {
                Rule::number => Some(Token::Number(text)),
                Rule::identifier => Some(Token::Identifier(text)),
                Rule::operator => Some(Token::Operator(text)),
                Rule::left_paren => Some(Token::LeftParen),
                Rule::right_paren => Some(Token::RightParen),
                Rule::comma => Some(Token::Comma),
                Rule::unknown => Some(Token::Unknown(text)),
                _ => None,
            }
        })
        .collect::<Vec<_>>();

    debug!("Tokens: {:?}", tokens);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::texts;

    #[test]
    fn test_tokenize_function_call() {
        let tokens = tokenize("3+2-log(8,2)").unwrap();
        assert_eq!(
            texts(&tokens),
            vec!["3", "+", "2", "-", "log", "(", "8", ",", "2", ")"]
        );
        assert_eq!(
            texts(&tokenize("sin(pi/2)").unwrap()),
            vec!["sin", "(", "pi", "/", "2", ")"]
        );
    }

    #[test]
    fn test_multi_character_operators_are_kept_whole() {
        let tokens = tokenize("1<=2==3!=4>=5**6//7").unwrap();
        assert_eq!(
            texts(&tokens),
            vec!["1", "<=", "2", "==", "3", "!=", "4", ">=", "5", "**", "6", "//", "7"]
        );
    }

    #[test]
    fn test_classification() {
        let tokens = tokenize("2.5e3 x ( , ) !").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number("2.5e3".to_string()),
                Token::Identifier("x".to_string()),
                Token::LeftParen,
                Token::Comma,
                Token::RightParen,
                Token::Operator("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts(&tokenize(".5+1.").unwrap()), vec![".5", "+", "1."]);
        // `e` without exponent digits stays a separate identifier
        assert_eq!(texts(&tokenize("2e").unwrap()), vec!["2", "e"]);
        assert_eq!(texts(&tokenize("2pi").unwrap()), vec!["2", "pi"]);
    }

    #[test]
    fn test_whitespace_is_dropped() {
        assert_eq!(
            texts(&tokenize("  11 +\tsin( 13 ) ").unwrap()),
            vec!["11", "+", "sin", "(", "13", ")"]
        );
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_characters_become_tokens() {
        let tokens = tokenize("1[2").unwrap();
        assert_eq!(tokens[1], Token::Unknown("[".to_string()));
    }
}
