//! Index normalization and numeric ranges.

use crate::error::{Error, Limit, Result};

/// Normalizes a possibly-negative index against a sequence length.
///
/// Negative indices count from the end (`-1` is the last element). Returns
/// `None` when the normalized index falls outside `[0, len)`; read
/// operations treat that as "not found", write operations as a range error.
#[must_use]
pub fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let k = if index < 0 { len + index } else { index };
    if (0..len).contains(&k) {
        usize::try_from(k).ok()
    } else {
        None
    }
}

/// Resolves a negative index against `len` without bounds checking.
#[must_use]
pub fn resolve_index(index: i64, len: usize) -> i64 {
    if index < 0 {
        i64::try_from(len).map_or(index, |len| len + index)
    } else {
        index
    }
}

/// Fails with an index error when `value` falls outside `[min, max]`.
///
/// # Errors
///
/// Returns `ErrorKind::IndexOutOfRange` naming `desc`.
pub fn check_range(value: f64, min: f64, max: f64, desc: &str) -> Result<()> {
    if value < min || value > max || value.is_nan() {
        return Err(Error::index_out_of_range(desc, value, min, max));
    }
    Ok(())
}

/// Generates the inclusive, direction-aware sequence `from, from+step, ... to`.
///
/// When `step` is `None` it defaults to `+1` if `to >= from`, else `-1`. A
/// step pointing away from `to` yields an empty sequence.
///
/// # Errors
///
/// Fails when `step` is zero or NaN, when an endpoint is not finite, or when
/// the sequence would hold more than `limit` values.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn range(from: f64, to: f64, step: Option<f64>, limit: usize) -> Result<Vec<f64>> {
    if !from.is_finite() || !to.is_finite() {
        return Err(Error::invalid_argument("range", "bounds must be finite numbers"));
    }
    let step = match step {
        None if to >= from => 1.0,
        None => -1.0,
        Some(s) if s == 0.0 || s.is_nan() => {
            return Err(Error::invalid_argument("range", "step must not be 0"));
        }
        Some(s) => s,
    };

    let span = (to - from) / step;
    if span < 0.0 {
        return Ok(Vec::new());
    }
    let count = span.floor() + 1.0;
    if count > limit as f64 {
        return Err(Error::limit_exceeded(Limit::RangeLength { limit }));
    }

    // Past 2^53 a small step may not move the value; stop there.
    let mut values: Vec<f64> = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let value = from + i as f64 * step;
        if values.last().is_some_and(|&prev| prev == value) {
            break;
        }
        values.push(value);
    }
    Ok(values)
}
