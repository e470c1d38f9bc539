use crate::error::ExpressionError;
use crate::expression::Value;
use crate::functions::custom::{factorial, power};
use crate::functions::{Associativity, Registry};

pub const COMPARISON: u8 = 0;
pub const ADDITIVE: u8 = 2;
pub const MULTIPLICATIVE: u8 = 3;
pub const POWER: u8 = 4;

pub fn register(registry: &mut Registry) {
    use Associativity::{Left, Right};

    registry.register_infix("^", POWER, Right, |a, b| power(a, b).map(Value::Number));
    registry.register_infix("**", POWER, Right, |a, b| power(a, b).map(Value::Number));
    registry.register_infix("/", MULTIPLICATIVE, Left, |a, b| {
        divide(a, b).map(Value::Number)
    });
    registry.register_infix("//", MULTIPLICATIVE, Left, |a, b| {
        int_divide(a, b).map(Value::Number)
    });
    registry.register_infix("%", MULTIPLICATIVE, Left, |a, b| {
        remainder(a, b).map(Value::Number)
    });
    registry.register_infix("*", MULTIPLICATIVE, Left, |a, b| Ok(Value::Number(a * b)));
    registry.register_infix("+", ADDITIVE, Left, |a, b| Ok(Value::Number(a + b)));
    registry.register_infix("-", ADDITIVE, Left, |a, b| Ok(Value::Number(a - b)));

    registry.register_infix("<", COMPARISON, Left, |a, b| Ok(Value::Boolean(a < b)));
    registry.register_infix("<=", COMPARISON, Left, |a, b| Ok(Value::Boolean(a <= b)));
    registry.register_infix("=", COMPARISON, Left, |a, b| Ok(Value::Boolean(a == b)));
    registry.register_infix("==", COMPARISON, Left, |a, b| Ok(Value::Boolean(a == b)));
    registry.register_infix("!=", COMPARISON, Left, |a, b| Ok(Value::Boolean(a != b)));
    registry.register_infix(">=", COMPARISON, Left, |a, b| Ok(Value::Boolean(a >= b)));
    registry.register_infix(">", COMPARISON, Left, |a, b| Ok(Value::Boolean(a > b)));

    registry.register_postfix("!", factorial);
}

pub fn divide(left: f64, right: f64) -> Result<f64, ExpressionError> {
    if right == 0.0 {
        Err(ExpressionError::DivideByZero)
    } else {
        Ok(left / right)
    }
}

/// Floor division that agrees with [`remainder`], so
/// `left == (left // right) * right + left % right`.
///
/// The quotient is taken from `left - fmod(left, right)`, which is exact, and
/// then snapped to the nearest integer, so `1 // 0.1` is 9 rather than 10.
pub fn int_divide(left: f64, right: f64) -> Result<f64, ExpressionError> {
    if right == 0.0 {
        return Err(ExpressionError::DivideByZero);
    }
    let rest = left % right;
    let mut quotient = (left - rest) / right;
    if rest != 0.0 && (rest < 0.0) != (right < 0.0) {
        quotient -= 1.0;
    }
    if quotient == 0.0 {
        return Ok(0f64.copysign(left / right));
    }
    let floored = quotient.floor();
    if quotient - floored > 0.5 {
        Ok(floored + 1.0)
    } else {
        Ok(floored)
    }
}

/// Remainder taking the sign of the divisor.
pub fn remainder(left: f64, right: f64) -> Result<f64, ExpressionError> {
    if right == 0.0 {
        return Err(ExpressionError::DivideByZero);
    }
    let rest = left % right;
    if rest != 0.0 && (rest < 0.0) != (right < 0.0) {
        Ok(rest + right)
    } else {
        Ok(rest)
    }
}
