//! Polymorphic collection functions over lists, maps and strings.
//!
//! Operations the host historically treated as lookups (`hasIndex`,
//! `indexOf`, `len`, `pop`, ...) answer nil or false for unsupported
//! variants. Operations that only make sense on one variant fail with a
//! type mismatch.

use std::cmp::Ordering;
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use glint_foundation::{
    Error, Limit, List, Result, Type, Value, check_range, deep_equal, normalize_index,
    resolve_index,
};

use super::string::{char_find, char_len, char_rfind, char_slice, regex_options, replace_text};
use super::{arg, int_arg, len_value, type_error};
use crate::context::Context;

/// Resolves an optional search offset; nil means "from the start".
#[allow(clippy::cast_possible_truncation)]
fn offset_arg(value: &Value) -> Option<i64> {
    value.to_number().map(|n| n as i64)
}

/// Clamps a resolved offset into `[0, len]`.
fn clamp(index: i64, len: usize) -> usize {
    usize::try_from(index.max(0)).map_or(len, |i| i.min(len))
}

// =============================================================================
// Lookups
// =============================================================================

/// Collection: hasIndex
pub(crate) fn native_has_index(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let index = arg(args, 1);
    let found = match (&arg(args, 0), &index) {
        (Value::Map(m), key) => m.contains_key(key),
        (Value::List(l), Value::Number(n)) if n.fract() == 0.0 => {
            offset_arg(&index).and_then(|i| normalize_index(i, l.len())).is_some()
        }
        (Value::String(s), Value::Number(n)) if n.fract() == 0.0 => offset_arg(&index)
            .and_then(|i| normalize_index(i, char_len(s)))
            .is_some(),
        _ => false,
    };
    Ok(Value::Boolean(found))
}

/// Collection: indexOf
///
/// Lists search strictly after `after`; maps search keys after the entry
/// whose key equals `after`; strings search from character `after + 1`.
pub(crate) fn native_index_of(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let needle = arg(args, 1);
    let after = arg(args, 2);
    match arg(args, 0) {
        Value::List(l) => {
            let items = l.snapshot();
            let len = items.len();
            let start = offset_arg(&after).map_or(0, |a| clamp(resolve_index(a, len) + 1, len));
            Ok(items
                .iter()
                .enumerate()
                .skip(start)
                .find(|(_, item)| deep_equal(item, &needle))
                .map_or(Value::Nil, |(i, _)| len_value(i)))
        }
        Value::Map(m) => {
            let entries = m.entries();
            let start = if after.is_nil() {
                0
            } else {
                match entries.iter().position(|(k, _)| deep_equal(k, &after)) {
                    Some(pos) => pos + 1,
                    None => return Ok(Value::Nil),
                }
            };
            Ok(entries
                .into_iter()
                .skip(start)
                .find(|(_, v)| deep_equal(v, &needle))
                .map_or(Value::Nil, |(k, _)| k))
        }
        Value::String(s) => {
            if needle.is_nil() {
                return Ok(Value::Nil);
            }
            let len = char_len(&s);
            let start = offset_arg(&after).map_or(0, |a| clamp(resolve_index(a, len) + 1, len));
            Ok(char_find(&s, &needle.to_string(), start).map_or(Value::Nil, len_value))
        }
        _ => Ok(Value::Nil),
    }
}

/// Collection: lastIndexOf
///
/// Lists and strings consider positions at or before `before`; maps
/// consider keys strictly before the entry whose key equals `before`.
pub(crate) fn native_last_index_of(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let needle = arg(args, 1);
    let before = arg(args, 2);
    match arg(args, 0) {
        Value::List(l) => {
            let items = l.snapshot();
            let end = match offset_arg(&before) {
                None => items.len(),
                Some(b) => {
                    let b = resolve_index(b, items.len());
                    if b < 0 {
                        return Ok(Value::Nil);
                    }
                    clamp(b + 1, items.len())
                }
            };
            Ok((0..end)
                .rev()
                .find(|&i| items.get(i).is_some_and(|item| deep_equal(item, &needle)))
                .map_or(Value::Nil, len_value))
        }
        Value::Map(m) => {
            let entries = m.entries();
            let end = if before.is_nil() {
                entries.len()
            } else {
                match entries.iter().position(|(k, _)| deep_equal(k, &before)) {
                    Some(pos) => pos,
                    None => return Ok(Value::Nil),
                }
            };
            Ok(entries
                .into_iter()
                .take(end)
                .rev()
                .find(|(_, v)| deep_equal(v, &needle))
                .map_or(Value::Nil, |(k, _)| k))
        }
        Value::String(s) => {
            if needle.is_nil() {
                return Ok(Value::Nil);
            }
            let len = char_len(&s);
            let limit = match offset_arg(&before) {
                None => len,
                Some(b) => {
                    let b = resolve_index(b, len);
                    if b < 0 {
                        return Ok(Value::Nil);
                    }
                    clamp(b, len)
                }
            };
            Ok(char_rfind(&s, &needle.to_string(), limit).map_or(Value::Nil, len_value))
        }
        _ => Ok(Value::Nil),
    }
}

/// Collection: indexes
pub(crate) fn native_indexes(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    Ok(match arg(args, 0) {
        Value::List(l) => (0..l.len()).map(len_value).collect::<List>().into(),
        Value::Map(m) => m.keys().into_iter().collect::<List>().into(),
        Value::String(s) => (0..char_len(&s)).map(len_value).collect::<List>().into(),
        _ => Value::Nil,
    })
}

/// Collection: values
///
/// Lists return a copy, so mutating the result leaves the receiver alone.
pub(crate) fn native_values(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    Ok(match arg(args, 0) {
        Value::List(l) => List::from(l.snapshot()).into(),
        Value::Map(m) => m.values().into_iter().collect::<List>().into(),
        Value::String(s) => s.chars().map(Value::from).collect::<List>().into(),
        _ => Value::Nil,
    })
}

/// Collection: len
pub(crate) fn native_len(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    Ok(match arg(args, 0) {
        Value::List(l) => len_value(l.len()),
        Value::Map(m) => len_value(m.len()),
        Value::String(s) => len_value(char_len(&s)),
        _ => Value::Nil,
    })
}

/// Collection: slice
///
/// Negative offsets count from the end and both ends clamp to the
/// sequence. `to == 0` means "through the end".
pub(crate) fn native_slice(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let from = arg(args, 1);
    let Some(from) = offset_arg(&from) else {
        return Ok(Value::Nil);
    };
    let to = offset_arg(&arg(args, 2)).unwrap_or(0);
    let bounds = |len: usize| {
        let start = clamp(resolve_index(from, len), len);
        let end = if to == 0 { len } else { clamp(resolve_index(to, len), len) };
        (start, end.max(start))
    };
    Ok(match arg(args, 0) {
        Value::List(l) => {
            let items = l.snapshot();
            let (start, end) = bounds(items.len());
            items.iter().skip(start).take(end - start).cloned().collect::<List>().into()
        }
        Value::String(s) => {
            let (start, end) = bounds(char_len(&s));
            Value::from(char_slice(&s, start, end))
        }
        _ => Value::Nil,
    })
}

// =============================================================================
// Mutation
// =============================================================================

/// Collection: insert
///
/// Lists are modified in place and returned; strings return a new string.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn native_insert(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let receiver = arg(args, 0);
    let value = arg(args, 2);
    match &receiver {
        Value::List(l) => {
            let index = int_arg(args, 1)?;
            let len = l.len();
            let k = resolve_index(index, len);
            check_range(k as f64, 0.0, len as f64, "index")?;
            if matches!(&value, Value::List(inner) if inner.ptr_eq(l)) {
                return Err(Error::invalid_argument("insert", "cannot insert a list into itself"));
            }
            l.insert(clamp(k, len), value);
            Ok(receiver)
        }
        Value::String(s) => {
            let index = int_arg(args, 1)?;
            let len = char_len(s);
            let k = resolve_index(index, len);
            check_range(k as f64, 0.0, len as f64, "index")?;
            let k = clamp(k, len);
            let text = format!("{}{}{}", char_slice(s, 0, k), value, char_slice(s, k, len));
            Ok(Value::from(text))
        }
        other => Err(type_error(Type::Sequence, other)),
    }
}

/// Collection: remove
///
/// Maps answer whether the key was present. Lists fail on an out-of-range
/// index. Strings return a copy without the first occurrence of `key`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn native_remove(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let key = arg(args, 1);
    if key.is_nil() {
        return Err(Error::invalid_argument("remove", "key must not be null"));
    }
    match arg(args, 0) {
        Value::Map(m) => Ok(Value::Boolean(m.remove(&key).is_some())),
        Value::List(l) => {
            let index = int_arg(args, 1)?;
            let len = l.len();
            let k = normalize_index(index, len).ok_or_else(|| {
                Error::index_out_of_range("index", index as f64, -(len as f64), len as f64 - 1.0)
            })?;
            l.remove(k);
            Ok(Value::Nil)
        }
        Value::String(s) => Ok(Value::from(s.replacen(&key.to_string(), "", 1))),
        other => Err(type_error(Type::Collection, &other)),
    }
}

/// Collection: push
///
/// Maps record the value as a key mapped to 1.
pub(crate) fn native_push(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let receiver = arg(args, 0);
    let value = arg(args, 1);
    match &receiver {
        Value::List(l) => {
            if matches!(&value, Value::List(inner) if inner.ptr_eq(l)) {
                return Err(Error::invalid_argument("push", "cannot push a list into itself"));
            }
            l.push(value);
            Ok(receiver)
        }
        Value::Map(m) => {
            if value.is_nil() {
                return Err(Error::invalid_argument("push", "key map cannot be null"));
            }
            if matches!(&value, Value::Map(inner) if inner.ptr_eq(m)) {
                return Err(Error::invalid_argument("push", "cannot push a map into itself"));
            }
            if m.contains_key(&value) {
                return Err(Error::invalid_argument(
                    "push",
                    format!("key map has already been added: {value}"),
                ));
            }
            m.insert(value, Value::Number(1.0));
            Ok(receiver)
        }
        _ => Ok(Value::Nil),
    }
}

/// Collection: pop
///
/// Lists yield their last element; maps remove the newest entry and yield its value.
pub(crate) fn native_pop(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    Ok(match arg(args, 0) {
        Value::List(l) => l.pop().unwrap_or(Value::Nil),
        Value::Map(m) => m.pop_newest().map_or(Value::Nil, |(_, v)| v),
        _ => Value::Nil,
    })
}

/// Collection: pull
///
/// Lists yield their first element; maps remove the oldest entry and yield its value.
pub(crate) fn native_pull(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    Ok(match arg(args, 0) {
        Value::List(l) => l.pull().unwrap_or(Value::Nil),
        Value::Map(m) => m.pop_oldest().map_or(Value::Nil, |(_, v)| v),
        _ => Value::Nil,
    })
}

/// Collection: reverse
pub(crate) fn native_reverse(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    match arg(args, 0) {
        Value::List(l) => {
            let mut items: Vec<Value> = l.snapshot().into_iter().collect();
            items.reverse();
            l.replace_contents(items.into_iter().collect());
            Ok(Value::Nil)
        }
        other => Err(type_error(Type::List, &other)),
    }
}

/// Collection: replace
///
/// Lists and maps replace matching elements in place and return the
/// receiver; strings return a new string. `maxCount` of nil replaces every
/// match.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn native_replace(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let receiver = arg(args, 0);
    let old = arg(args, 1);
    let new = arg(args, 2);
    let max_count = match arg(args, 3) {
        Value::Nil => None,
        count => {
            let n = count.to_number().ok_or_else(|| type_error(Type::Number, &count))?;
            check_range(n, 1.0, f64::MAX, "maxCount")?;
            Some(n as usize)
        }
    };

    let replace_all = |items: Vec<Value>| -> Vec<Value> {
        let mut remaining = max_count.unwrap_or(usize::MAX);
        items
            .into_iter()
            .map(|item| {
                if remaining > 0 && deep_equal(&item, &old) {
                    remaining -= 1;
                    new.clone()
                } else {
                    item
                }
            })
            .collect()
    };

    match &receiver {
        Value::List(l) => {
            let items = replace_all(l.snapshot().into_iter().collect());
            l.replace_contents(items.into_iter().collect());
            Ok(receiver)
        }
        Value::Map(m) => {
            m.assign_values(replace_all(m.values()));
            Ok(receiver)
        }
        Value::String(s) => {
            if old.is_nil() {
                return Err(Error::invalid_argument("replace", "pattern must not be null"));
            }
            let new = if new.is_nil() { String::new() } else { new.to_string() };
            let options = regex_options(args, 4);
            let text = replace_text(s, &old.to_string(), &new, max_count, options.as_deref())?;
            Ok(Value::from(text))
        }
        other => Err(type_error(Type::Collection, other)),
    }
}

// =============================================================================
// Ordering
// =============================================================================

/// Sort key for one element, ranked missing < number < string < other.
enum SortKey {
    Missing,
    Number(f64),
    Text(Arc<str>),
    Other(String),
}

impl SortKey {
    fn of(item: &Value, selector: &Value) -> Self {
        let selected = match (item, selector) {
            (_, Value::Nil) => Some(item.clone()),
            (Value::Map(m), key) => m.get(key),
            (Value::List(l), key) => key
                .to_int()
                .and_then(|i| normalize_index(i, l.len()))
                .and_then(|i| l.get(i)),
            _ => None,
        };
        match selected {
            None | Some(Value::Nil) => Self::Missing,
            Some(Value::Number(n)) => Self::Number(n),
            Some(Value::Boolean(b)) => Self::Number(if b { 1.0 } else { 0.0 }),
            Some(Value::String(s)) => Self::Text(s),
            Some(other) => Self::Other(other.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Other(_) => 3,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => compare_text(a, b),
            (Self::Other(a), Self::Other(b)) => compare_text(a, b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Case-insensitive comparison; on a tie lowercase sorts first.
///
/// Compares lowercased code points, not locale collation: accented letters
/// sort after `z`.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Collection: sort
///
/// Stable. Descending order reverses the whole ordering, so strings come
/// before numbers and missing keys sort last.
pub(crate) fn native_sort(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let receiver = arg(args, 0);
    let Value::List(list) = &receiver else {
        return Ok(Value::Nil);
    };
    let selector = arg(args, 1);
    let ascending = arg(args, 2).is_truthy();

    let mut keyed: Vec<(SortKey, Value)> = list
        .snapshot()
        .into_iter()
        .map(|item| (SortKey::of(&item, &selector), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let order = a.compare(b);
        if ascending { order } else { order.reverse() }
    });
    list.replace_contents(keyed.into_iter().map(|(_, item)| item).collect());
    Ok(receiver)
}

/// Collection: shuffle
///
/// Fisher-Yates over lists; maps keep their keys and permute values.
pub(crate) fn native_shuffle(ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let limit = ctx.limits().max_shuffle_len;
    let check = |len: usize| {
        if len > limit {
            debug!(len, limit, "rejecting oversized shuffle");
            return Err(Error::limit_exceeded(Limit::ShuffleLength { limit, actual: len }));
        }
        Ok(())
    };
    match arg(args, 0) {
        Value::List(l) => {
            check(l.len())?;
            let mut items: Vec<Value> = l.snapshot().into_iter().collect();
            fisher_yates(ctx, &mut items);
            l.replace_contents(items.into_iter().collect());
        }
        Value::Map(m) => {
            check(m.len())?;
            let mut values = m.values();
            fisher_yates(ctx, &mut values);
            m.assign_values(values);
        }
        _ => {}
    }
    Ok(Value::Nil)
}

fn fisher_yates(ctx: &mut Context, items: &mut [Value]) {
    let rng = ctx.rng_mut();
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Collection: sum
///
/// Elements that are not numbers contribute 0.
pub(crate) fn native_sum(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let total = |items: Vec<Value>| {
        items
            .iter()
            .filter_map(Value::to_number)
            .filter(|n| !n.is_nan())
            .sum::<f64>()
    };
    Ok(Value::Number(match arg(args, 0) {
        Value::List(l) => total(l.snapshot().into_iter().collect()),
        Value::Map(m) => total(m.values()),
        _ => 0.0,
    }))
}

/// Collection: join
pub(crate) fn native_join(ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let Value::List(list) = arg(args, 0) else {
        return Err(type_error(Type::List, &arg(args, 0)));
    };
    let separator = match arg(args, 1) {
        Value::Nil => String::new(),
        other => other.to_string(),
    };
    let limit = ctx.limits().max_separator_len;
    let actual = char_len(&separator);
    if actual > limit {
        debug!(actual, limit, "rejecting oversized join separator");
        return Err(Error::limit_exceeded(Limit::SeparatorLength { limit, actual }));
    }
    let parts: Vec<String> = list.snapshot().iter().map(ToString::to_string).collect();
    Ok(Value::from(parts.join(&separator)))
}
