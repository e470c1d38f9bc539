//! Curated overrides layered on top of the general math set.

use crate::error::ExpressionError;
use crate::functions::Registry;

pub fn register(registry: &mut Registry) {
    registry.register_binary("log", logarithm);
    registry.register_unary("log2", logarithm_by_two);
    registry.register_unary("log10", logarithm_by_ten);
    registry.register_unary("ln", logarithm_by_e);
    registry.register_binary("pow", power);
    registry.register_unary("sqrt", square_root);
    registry.register_unary("abs", |x| Ok(x.abs()));
    registry.register_unary("round", |x| Ok(x.round_ties_even()));
    registry.register_unary("factorial", factorial);
    registry.register_unary("minus", unary_minus);
    registry.register_unary("plus", unary_plus);
}

pub fn unary_minus(value: f64) -> Result<f64, ExpressionError> {
    Ok(-value)
}

pub fn unary_plus(value: f64) -> Result<f64, ExpressionError> {
    Ok(value)
}

/// Factorial of a non-negative integral value. Anything past 170! overflows to infinity.
pub fn factorial(value: f64) -> Result<f64, ExpressionError> {
    if value < 0.0 {
        return Err(ExpressionError::domain(
            "can't count factorial of negative number",
        ));
    }
    if value.fract() != 0.0 {
        return Err(ExpressionError::domain(
            "can't count factorial of fractional number",
        ));
    }
    if value > 170.0 {
        return Ok(f64::INFINITY);
    }

    let mut result = 1.0;
    let mut factor = 2.0;
    while factor <= value {
        result *= factor;
        factor += 1.0;
    }
    Ok(result)
}

/// `log(value, base)`.
pub fn logarithm(value: f64, base: f64) -> Result<f64, ExpressionError> {
    if base == 1.0 {
        return Err(ExpressionError::domain("can't count logarithm by base 1"));
    }
    if value <= 0.0 {
        return Err(ExpressionError::domain(
            "can't count logarithm of non-positive digit",
        ));
    }
    if base <= 0.0 {
        return Err(ExpressionError::domain(
            "can't count logarithm by non-positive base",
        ));
    }
    Ok(value.ln() / base.ln())
}

pub fn logarithm_by_e(value: f64) -> Result<f64, ExpressionError> {
    if value > 0.0 {
        Ok(value.ln())
    } else {
        Err(ExpressionError::domain("can't count non-positive logarithm"))
    }
}

pub fn logarithm_by_two(value: f64) -> Result<f64, ExpressionError> {
    if value > 0.0 {
        Ok(value.log2())
    } else {
        Err(ExpressionError::domain(
            "can't count logarithm of non-positive digit by base 2",
        ))
    }
}

pub fn logarithm_by_ten(value: f64) -> Result<f64, ExpressionError> {
    if value > 0.0 {
        Ok(value.log10())
    } else {
        Err(ExpressionError::domain(
            "can't count logarithm of non-positive number by base 10",
        ))
    }
}

pub fn power(base: f64, exponent: f64) -> Result<f64, ExpressionError> {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(ExpressionError::domain(
            "can't raise negative number to fractional power",
        ));
    }
    if base == 0.0 && exponent < 0.0 {
        return Err(ExpressionError::DivideByZero);
    }
    Ok(base.powf(exponent))
}

pub fn square_root(value: f64) -> Result<f64, ExpressionError> {
    if value >= 0.0 {
        Ok(value.sqrt())
    } else {
        Err(ExpressionError::domain(
            "can't count square root of negative number",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_signs() {
        assert_eq!(unary_minus(5.0).unwrap(), -5.0);
        assert_eq!(unary_minus(-5.6).unwrap(), 5.6);
        assert_eq!(unary_plus(-5.5).unwrap(), -5.5);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(5.0).unwrap(), 120.0);
        assert_eq!(factorial(0.0).unwrap(), 1.0);
        assert_eq!(factorial(1000.0).unwrap(), f64::INFINITY);
        assert!(matches!(factorial(6.66), Err(ExpressionError::Domain(_))));
        assert!(matches!(factorial(-13.0), Err(ExpressionError::Domain(_))));
        assert!(matches!(
            factorial(f64::INFINITY),
            Err(ExpressionError::Domain(_))
        ));
    }

    #[test]
    fn test_logarithm() {
        assert!((logarithm(8.0, 2.0).unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(
            logarithm(8.0, 1.0),
            Err(ExpressionError::Domain(
                "can't count logarithm by base 1".to_string()
            ))
        );
        assert!(matches!(
            logarithm(-8.0, -2.0),
            Err(ExpressionError::Domain(_))
        ));
        assert!(matches!(
            logarithm(8.0, -2.0),
            Err(ExpressionError::Domain(_))
        ));
    }

    #[test]
    fn test_single_argument_logarithms() {
        assert_eq!(logarithm_by_e(13.0).unwrap(), 13f64.ln());
        assert!(logarithm_by_e(-20.0).is_err());
        assert_eq!(logarithm_by_two(8.0).unwrap(), 3.0);
        assert!(logarithm_by_two(-666.0).is_err());
        assert!((logarithm_by_ten(1000.0).unwrap() - 3.0).abs() < 1e-12);
        assert!(logarithm_by_ten(0.0).is_err());
    }

    #[test]
    fn test_power() {
        for i in -5..5 {
            let base = i as f64;
            assert_eq!(power(base, 2.0).unwrap(), base * base);
        }
        assert!(matches!(
            power(-6.66, 0.28),
            Err(ExpressionError::Domain(_))
        ));
        assert_eq!(power(-2.0, 3.0).unwrap(), -8.0);
        assert_eq!(power(0.0, -1.0), Err(ExpressionError::DivideByZero));
    }

    #[test]
    fn test_square_root() {
        assert_eq!(square_root(16.0).unwrap(), 4.0);
        assert_eq!(square_root(101.1).unwrap(), 101.1f64.sqrt());
        assert!(matches!(
            square_root(-2.0),
            Err(ExpressionError::Domain(_))
        ));
    }
}
