//! Conversions, output, hashing, ranges and random numbers.

use rand::Rng;

use glint_foundation::{Result, Type, Value, deep_hash, parse_number, range};

use super::{arg, type_error};
use crate::context::Context;

/// Generic: print
pub(crate) fn native_print(ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let text = arg(args, 0).to_string();
    ctx.output_mut().print(&text);
    Ok(Value::Nil)
}

/// Generic: str
pub(crate) fn native_str(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    Ok(Value::from(arg(args, 0).to_string()))
}

/// Generic: val
///
/// Numeric strings become numbers; other strings are returned unchanged.
pub(crate) fn native_val(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    Ok(match arg(args, 0) {
        Value::Number(n) => Value::Number(n),
        Value::String(s) => {
            let n = parse_number(&s);
            if n.is_nan() { Value::String(s) } else { Value::Number(n) }
        }
        _ => Value::Nil,
    })
}

/// Generic: hash
///
/// A nil depth falls back to the context's configured depth.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn native_hash(ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let depth = match arg(args, 1) {
        Value::Nil => ctx.limits().hash_depth,
        other => {
            let n = other.to_number().ok_or_else(|| type_error(Type::Number, &other))?;
            n.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
        }
    };
    Ok(Value::Number(f64::from(deep_hash(&arg(args, 0), depth))))
}

/// Generic: range
///
/// Endpoints must be numbers already; strings are not converted.
pub(crate) fn native_range(ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let number = |index: usize| {
        let value = arg(args, index);
        value.as_number().ok_or_else(|| type_error(Type::Number, &value))
    };
    let from = number(0)?;
    let to = number(1)?;
    let step = match arg(args, 2) {
        Value::Nil => None,
        _ => Some(number(2)?),
    };
    let values = range(from, to, step, ctx.limits().max_range_len)?;
    Ok(Value::from(values))
}

/// Generic: rnd
///
/// A truthy seed draws from the reproducible stream for that seed's string
/// form; otherwise the context's unseeded source is used.
pub(crate) fn native_rnd(ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let seed = arg(args, 0);
    let n = if seed.is_truthy() {
        ctx.seeds_mut().next(&seed.to_string())
    } else {
        ctx.rng_mut().r#gen::<f64>()
    };
    Ok(Value::Number(n))
}
