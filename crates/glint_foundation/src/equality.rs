//! Deep structural equality and depth-bounded deep hashing.
//!
//! # Equality
//!
//! Maps equal maps with the same key set and deep-equal values; lists equal
//! lists of the same length with pairwise deep-equal elements. Every other
//! pairing compares canonical string forms, so `1` equals `"1"`. That string
//! rule is the governing rule for mixed variants, not a special case.
//!
//! Comparison tracks the container pairs it is currently inside. Meeting the
//! same pair again counts as equal, so two distinct structures with the same
//! cyclic shape compare equal instead of recursing forever. Containers
//! nested more than [`MAX_EQUAL_DEPTH`] levels deep compare unequal.
//!
//! # Hashing
//!
//! [`deep_hash`] XOR-combines element hashes and stops descending once
//! `max_depth` is exhausted: contributions nested below the cutoff are
//! ignored, so structures that differ only below it collide. For a fixed
//! depth, values of the same variant that are deep-equal hash equally. Values
//! of different variants that are equal only under the string rule (`1` and
//! `"1"`) generally do not; map slots therefore use [`slot_hash`], which is
//! consistent with equality across variants.

use std::cell::RefCell;

use crate::value::Value;

/// Default recursion depth for [`deep_hash`].
pub const DEFAULT_HASH_DEPTH: i32 = 16;

/// Nesting depth past which [`deep_equal`] treats containers as unequal.
pub const MAX_EQUAL_DEPTH: usize = 256;

/// Slot shared by every container key and every string that could equal one.
const CONTAINER_SLOT: i32 = 0x005b_007b;

/// Truncates a number to a signed 32-bit integer with wraparound.
///
/// Non-finite input yields 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let wrapped = n.trunc().rem_euclid(4_294_967_296.0);
    if wrapped >= 2_147_483_648.0 {
        (wrapped - 4_294_967_296.0) as i32
    } else {
        wrapped as i32
    }
}

/// Mixes one number into a running hash: `((offset << 5) - offset + value) | 0`.
#[must_use]
pub fn hash_code(value: f64, offset: i32) -> i32 {
    if value == 0.0 {
        return 0;
    }
    to_int32(f64::from(offset.wrapping_shl(5)) - f64::from(offset) + value)
}

/// Polynomial rolling hash over the UTF-16 code units of `text`.
///
/// The empty string hashes to 0.
#[must_use]
pub fn string_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

thread_local! {
    /// Container pairs currently being compared on this thread, outermost first.
    static OPEN_PAIRS: RefCell<Vec<(usize, usize)>> = const { RefCell::new(Vec::new()) };
}

/// Pops the innermost open pair, also on unwind.
struct OpenPair;

impl Drop for OpenPair {
    fn drop(&mut self) {
        OPEN_PAIRS.with_borrow_mut(|open| {
            open.pop();
        });
    }
}

/// Runs `compare` with `pair` marked open.
fn within_pair(pair: (usize, usize), compare: impl FnOnce() -> bool) -> bool {
    let settled = OPEN_PAIRS.with_borrow_mut(|open| {
        if open.contains(&pair) {
            Some(true)
        } else if open.len() >= MAX_EQUAL_DEPTH {
            Some(false)
        } else {
            open.push(pair);
            None
        }
    });
    if let Some(equal) = settled {
        return equal;
    }
    let _open = OpenPair;
    compare()
}

/// Deep structural equality.
#[must_use]
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Map(x), Value::Map(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            if x.len() != y.len() {
                return false;
            }
            within_pair((x.addr(), y.addr()), || {
                x.entries()
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| deep_equal(v, &w)))
            })
        }
        (Value::List(x), Value::List(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let (xs, ys) = (x.snapshot(), y.snapshot());
            if xs.len() != ys.len() {
                return false;
            }
            within_pair((x.addr(), y.addr()), || {
                xs.iter().zip(ys.iter()).all(|(p, q)| deep_equal(p, q))
            })
        }
        (Value::Nil, Value::Nil) => true,
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::String(x), Value::String(y)) => x == y,
        _ => a.to_string() == b.to_string(),
    }
}

/// Depth-bounded deep hash.
///
/// Lists stop descending when `max_depth < 1`, maps when `max_depth < 0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn deep_hash(value: &Value, max_depth: i32) -> i32 {
    match value {
        Value::List(list) => {
            let items = list.snapshot();
            let mut result = hash_code(items.len() as f64, 0);
            if max_depth < 1 {
                return result;
            }
            for item in &items {
                result ^= deep_hash(item, max_depth - 1);
            }
            result
        }
        Value::Map(map) => {
            let entries = map.entries();
            let mut result = hash_code(entries.len() as f64, 0);
            if max_depth < 0 {
                return result;
            }
            for (key, item) in &entries {
                result ^= key_hash(key, max_depth - 1);
                result ^= deep_hash(item, max_depth - 1);
            }
            result
        }
        Value::String(s) => string_hash(s),
        Value::Boolean(b) => hash_code(if *b { 1.0 } else { 0.0 }, 0),
        Value::Number(n) => hash_code(*n, 0),
        Value::Nil => 0,
    }
}

fn key_hash(key: &Value, max_depth: i32) -> i32 {
    match key {
        Value::String(s) => string_hash(s),
        other => deep_hash(other, max_depth),
    }
}

/// Bucket hash for map slots, consistent with [`deep_equal`] across variants.
///
/// Scalars hash their canonical string. Containers, and strings that could
/// equal a container's string form, all share one bucket.
#[must_use]
pub fn slot_hash(key: &Value) -> i32 {
    match key {
        Value::List(_) | Value::Map(_) => CONTAINER_SLOT,
        Value::String(s) if s.starts_with(['[', '{']) => CONTAINER_SLOT,
        Value::String(s) => string_hash(s),
        other => string_hash(&other.to_string()),
    }
}
