//! General math function set and constants, registered before the curated overrides.

use crate::error::ExpressionError;
use crate::functions::Registry;
use std::f64::consts;

pub fn register(registry: &mut Registry) {
    registry.register_constant("e", consts::E);
    registry.register_constant("pi", consts::PI);
    registry.register_constant("tau", consts::TAU);
    registry.register_constant("inf", f64::INFINITY);
    registry.register_constant("nan", f64::NAN);

    registry.register_unary("acos", |x| checked(x, x.acos()));
    registry.register_unary("acosh", |x| checked(x, x.acosh()));
    registry.register_unary("asin", |x| checked(x, x.asin()));
    registry.register_unary("asinh", |x| checked(x, x.asinh()));
    registry.register_unary("atan", |x| checked(x, x.atan()));
    registry.register_unary("atanh", |x| checked(x, x.atanh()));
    registry.register_unary("cbrt", |x| Ok(x.cbrt()));
    registry.register_unary("ceil", |x| Ok(x.ceil()));
    registry.register_unary("cos", |x| checked(x, x.cos()));
    registry.register_unary("cosh", |x| Ok(x.cosh()));
    registry.register_unary("degrees", |x| Ok(x.to_degrees()));
    registry.register_unary("erf", |x| Ok(libm::erf(x)));
    registry.register_unary("erfc", |x| Ok(libm::erfc(x)));
    registry.register_unary("exp", |x| Ok(x.exp()));
    registry.register_unary("exp2", |x| Ok(x.exp2()));
    registry.register_unary("expm1", |x| Ok(x.exp_m1()));
    registry.register_unary("fabs", |x| Ok(x.abs()));
    registry.register_unary("floor", |x| Ok(x.floor()));
    registry.register_unary("gamma", gamma);
    registry.register_unary("isfinite", |x| Ok(flag(x.is_finite())));
    registry.register_unary("isinf", |x| Ok(flag(x.is_infinite())));
    registry.register_unary("isnan", |x| Ok(flag(x.is_nan())));
    registry.register_unary("isqrt", isqrt);
    registry.register_unary("lgamma", lgamma);
    registry.register_unary("log", |x| checked(x, x.ln()));
    registry.register_unary("log1p", |x| checked(x, x.ln_1p()));
    registry.register_unary("radians", |x| Ok(x.to_radians()));
    registry.register_unary("sin", |x| checked(x, x.sin()));
    registry.register_unary("sinh", |x| Ok(x.sinh()));
    registry.register_unary("sqrt", |x| checked(x, x.sqrt()));
    registry.register_unary("tan", |x| checked(x, x.tan()));
    registry.register_unary("tanh", |x| Ok(x.tanh()));
    registry.register_unary("trunc", |x| Ok(x.trunc()));

    registry.register_binary("atan2", |y, x| Ok(y.atan2(x)));
    registry.register_binary("copysign", |x, y| Ok(x.copysign(y)));
    registry.register_binary("fmod", |x, y| checked2(x, y, x % y));
    registry.register_binary("gcd", gcd);
    registry.register_binary("hypot", |x, y| Ok(x.hypot(y)));
    registry.register_binary("isclose", |a, b| Ok(flag(is_close(a, b))));
    registry.register_binary("ldexp", ldexp);
    registry.register_binary("pow", |x, y| checked2(x, y, x.powf(y)));
    registry.register_binary("remainder", |x, y| {
        checked2(x, y, x - y * (x / y).round_ties_even())
    });
}

/// Rejects a NaN produced from a finite argument.
fn checked(input: f64, output: f64) -> Result<f64, ExpressionError> {
    if input.is_finite() && output.is_nan() {
        Err(ExpressionError::domain("math domain error"))
    } else {
        Ok(output)
    }
}

fn checked2(left: f64, right: f64, output: f64) -> Result<f64, ExpressionError> {
    if left.is_finite() && right.is_finite() && output.is_nan() {
        Err(ExpressionError::domain("math domain error"))
    } else {
        Ok(output)
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

pub fn gcd(a: f64, b: f64) -> Result<f64, ExpressionError> {
    if a.fract() != 0.0 || b.fract() != 0.0 {
        return Err(ExpressionError::domain("gcd takes only integral arguments"));
    }
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0.0 {
        (a, b) = (b, a % b);
    }
    Ok(a)
}

pub fn ldexp(x: f64, exponent: f64) -> Result<f64, ExpressionError> {
    if exponent.fract() != 0.0 {
        return Err(ExpressionError::domain("ldexp exponent must be integral"));
    }
    Ok(libm::scalbn(x, exponent as i32))
}

/// Poles at zero and the negative integers are domain errors.
pub fn gamma(x: f64) -> Result<f64, ExpressionError> {
    if x <= 0.0 && (x.fract() == 0.0 || x.is_infinite()) {
        return Err(ExpressionError::domain("math domain error"));
    }
    Ok(libm::tgamma(x))
}

pub fn lgamma(x: f64) -> Result<f64, ExpressionError> {
    if x <= 0.0 && x.fract() == 0.0 {
        return Err(ExpressionError::domain("math domain error"));
    }
    Ok(libm::lgamma(x))
}

/// Integer square root, rounded down.
pub fn isqrt(x: f64) -> Result<f64, ExpressionError> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(ExpressionError::domain(
            "isqrt takes only non-negative integral arguments",
        ));
    }
    let mut root = x.sqrt().floor();
    // past 2^53 neighbouring floats are more than 1 apart
    if root < 9_007_199_254_740_992.0 {
        while root * root > x {
            root -= 1.0;
        }
        while (root + 1.0) * (root + 1.0) <= x {
            root += 1.0;
        }
    }
    Ok(root)
}

/// Relative closeness with a tolerance of 1e-9 and no absolute tolerance.
pub fn is_close(a: f64, b: f64) -> bool {
    const RELATIVE_TOLERANCE: f64 = 1e-9;
    if a == b {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    let difference = (a - b).abs();
    difference <= RELATIVE_TOLERANCE * b.abs() || difference <= RELATIVE_TOLERANCE * a.abs()
}
