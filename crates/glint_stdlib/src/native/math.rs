//! Numeric and bitwise functions.

use std::f64::consts::PI;

use glint_foundation::{Error, Result, Type, Value, check_range};

use super::{arg, number_arg, type_error};
use crate::context::Context;

/// Applies `f` to the first argument. Nil propagates as nil.
fn unary(args: &[Value], f: fn(f64) -> f64) -> Result<Value> {
    let value = arg(args, 0);
    if value.is_nil() {
        return Ok(Value::Nil);
    }
    let n = value.to_number().ok_or_else(|| type_error(Type::Number, &value))?;
    Ok(Value::Number(f(n)))
}

// =============================================================================
// Basic Math Functions
// =============================================================================

/// Math: abs
pub(crate) fn native_abs(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::abs)
}

/// Math: ceil
pub(crate) fn native_ceil(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::ceil)
}

/// Math: floor
pub(crate) fn native_floor(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::floor)
}

/// Math: sqrt
pub(crate) fn native_sqrt(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::sqrt)
}

/// Math: sign
///
/// Zero keeps its sign and NaN stays NaN.
pub(crate) fn native_sign(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, |n| if n == 0.0 || n.is_nan() { n } else { n.signum() })
}

/// Math: pi
pub(crate) fn native_pi(_ctx: &mut Context, _args: &[Value]) -> Result<Value> {
    Ok(Value::Number(PI))
}

/// Math: round
///
/// Half away from zero, with an epsilon bias so `round(1.005, 2)` is 1.01.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn native_round(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let value = arg(args, 0);
    if value.is_nil() {
        return Ok(Value::Nil);
    }
    let n = value.to_number().ok_or_else(|| type_error(Type::Number, &value))?;
    let places = number_arg(args, 1)?;
    check_range(places, 0.0, 15.0, "decimalPlaces")?;
    let factor = 10f64.powi(places as i32);
    let scaled = (n.abs() + f64::EPSILON) * factor;
    if !scaled.is_finite() {
        return Ok(Value::Number(n));
    }
    Ok(Value::Number((scaled.round() / factor).copysign(n)))
}

/// Math: log
pub(crate) fn native_log(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let value = arg(args, 0);
    if value.is_nil() {
        return Ok(Value::Nil);
    }
    let n = value.to_number().ok_or_else(|| type_error(Type::Number, &value))?;
    let base = number_arg(args, 1)?;
    if base <= 0.0 || base == 1.0 || base.is_nan() {
        return Err(Error::invalid_argument("log", format!("invalid base {base}")));
    }
    let result = if base == 10.0 { n.log10() } else { n.ln() / base.ln() };
    Ok(Value::Number(result))
}

// =============================================================================
// Trigonometry
// =============================================================================

/// Math: sin
pub(crate) fn native_sin(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::sin)
}

/// Math: cos
pub(crate) fn native_cos(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::cos)
}

/// Math: tan
pub(crate) fn native_tan(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::tan)
}

/// Math: asin
pub(crate) fn native_asin(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::asin)
}

/// Math: acos
pub(crate) fn native_acos(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::acos)
}

/// Math: atan
pub(crate) fn native_atan(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    unary(args, f64::atan)
}

// =============================================================================
// Bitwise
// =============================================================================

/// Math: bitwise
///
/// Operands are truncated to 64-bit two's complement. Shift amounts wrap
/// modulo 64 and `>>>` zero-fills. Results above 2^53 lose precision on the
/// way back to a number. Unknown operators yield nil.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub(crate) fn native_bitwise(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let operator = arg(args, 0).to_string();
    let a = number_arg(args, 1)? as i64;
    if operator == "~" {
        return Ok(Value::Number(!a as f64));
    }
    if !matches!(operator.as_str(), "&" | "|" | "^" | "<<" | ">>" | ">>>") {
        return Ok(Value::Nil);
    }
    let b = number_arg(args, 2)? as i64;
    let shift = b.rem_euclid(64) as u32;
    let result = match operator.as_str() {
        "&" => (a & b) as f64,
        "|" => (a | b) as f64,
        "^" => (a ^ b) as f64,
        "<<" => a.wrapping_shl(shift) as f64,
        ">>" => a.wrapping_shr(shift) as f64,
        _ => ((a as u64) >> shift) as f64,
    };
    Ok(Value::Number(result))
}
