//! String functions and character-offset helpers.
//!
//! Script strings are indexed by character, never by byte.

use regex::{Regex, RegexBuilder};

use glint_foundation::{Error, Result, Type, Value, parse_number};

use super::{arg, type_error};
use crate::context::Context;

// =============================================================================
// Character Offsets
// =============================================================================

/// Number of characters in `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of character `index`, or `text.len()` past the end.
pub(crate) fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices().nth(index).map_or(text.len(), |(b, _)| b)
}

/// Substring between character offsets `[start, end)`.
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(text, start);
    let to = byte_offset(text, end).max(from);
    &text[from..to]
}

/// Character offset of the first occurrence of `needle` at or after `start`.
pub(crate) fn char_find(text: &str, needle: &str, start: usize) -> Option<usize> {
    if start > char_len(text) {
        return None;
    }
    let from = byte_offset(text, start);
    text[from..]
        .find(needle)
        .map(|pos| char_len(&text[..from + pos]))
}

/// Character offset of the last occurrence of `needle` starting at or before `before`.
pub(crate) fn char_rfind(text: &str, needle: &str, before: usize) -> Option<usize> {
    let starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    if needle.is_empty() {
        return Some(before.min(starts.len()));
    }
    starts
        .iter()
        .enumerate()
        .take(before.saturating_add(1))
        .rev()
        .find(|&(_, &b)| text[b..].starts_with(needle))
        .map(|(ci, _)| ci)
}

// =============================================================================
// Regular Expressions
// =============================================================================

/// Compiles `pattern` with script-level option letters.
///
/// Options: `i` case-insensitive, `m` multi-line, `s` dot matches newline,
/// `x` ignore whitespace, `U` swap greed. `g` is accepted and ignored since
/// every operation already applies globally.
pub(crate) fn compile_pattern(function: &str, pattern: &str, options: &str) -> Result<Regex> {
    if pattern.is_empty() {
        return Err(Error::invalid_argument(function, "pattern must not be empty"));
    }
    let mut builder = RegexBuilder::new(pattern);
    for option in options.chars() {
        match option {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'U' => builder.swap_greed(true),
            'g' => &mut builder,
            other => {
                return Err(Error::invalid_argument(
                    function,
                    format!("invalid regex option '{other}'"),
                ));
            }
        };
    }
    builder
        .build()
        .map_err(|e| Error::invalid_argument(function, e.to_string()))
}

/// Reads the optional `regexOptions` argument; `None` means a literal match.
pub(crate) fn regex_options(args: &[Value], index: usize) -> Option<String> {
    match arg(args, index) {
        Value::Nil => None,
        other => Some(other.to_string()),
    }
}

// =============================================================================
// String Functions
// =============================================================================

/// String: lower
pub(crate) fn native_lower(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    match arg(args, 0) {
        Value::String(s) => Ok(Value::from(s.to_lowercase())),
        other => Ok(other),
    }
}

/// String: upper
pub(crate) fn native_upper(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    match arg(args, 0) {
        Value::String(s) => Ok(Value::from(s.to_uppercase())),
        other => Ok(other),
    }
}

/// String: trim
pub(crate) fn native_trim(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    match arg(args, 0) {
        Value::String(s) => Ok(Value::from(s.trim())),
        other => Err(type_error(Type::String, &other)),
    }
}

/// String: `to_int`
///
/// Numeric strings become their truncated value; anything else comes back
/// unchanged.
pub(crate) fn native_to_int(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    match arg(args, 0) {
        Value::String(s) => {
            let n = parse_number(&s);
            if n.is_nan() {
                Ok(Value::String(s))
            } else {
                Ok(Value::Number(n.trunc()))
            }
        }
        other => Ok(other),
    }
}

/// String: split
pub(crate) fn native_split(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let text = match arg(args, 0) {
        Value::String(s) => s,
        other => return Err(type_error(Type::String, &other)),
    };
    let delimiter = match arg(args, 1) {
        Value::Nil => return Err(Error::invalid_argument("split", "delimiter must not be null")),
        other => other.to_string(),
    };

    let parts: Vec<Value> = match regex_options(args, 2) {
        Some(options) => {
            let re = compile_pattern("split", &delimiter, &options)?;
            re.split(&text).map(Value::from).collect()
        }
        None if delimiter.is_empty() => text.chars().map(Value::from).collect(),
        None => text.split(delimiter.as_str()).map(Value::from).collect(),
    };
    Ok(Value::from(parts))
}

/// Replaces up to `max_count` occurrences of `old` in `text`.
pub(crate) fn replace_text(
    text: &str,
    old: &str,
    new: &str,
    max_count: Option<usize>,
    options: Option<&str>,
) -> Result<String> {
    if let Some(options) = options {
        let re = compile_pattern("replace", old, options)?;
        return Ok(re.replacen(text, max_count.unwrap_or(0), new).into_owned());
    }
    if old.is_empty() {
        return Err(Error::invalid_argument("replace", "pattern must not be empty"));
    }
    Ok(match max_count {
        Some(n) => text.replacen(old, new, n),
        None => text.replace(old, new),
    })
}

/// String: code
///
/// Code point of the first character; nil for the empty string.
pub(crate) fn native_code(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    match arg(args, 0) {
        Value::Nil => Err(Error::invalid_argument("code", "value must not be null")),
        other => Ok(other
            .to_string()
            .chars()
            .next()
            .map_or(Value::Nil, |c| Value::Number(f64::from(u32::from(c))))),
    }
}

/// Generic: char
///
/// Character for a code point; nil for 0, nil or an invalid scalar value.
pub(crate) fn native_char(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    let value = arg(args, 0);
    if value.is_nil() {
        return Ok(Value::Nil);
    }
    let code = value.to_int().ok_or_else(|| type_error(Type::Number, &value))?;
    if code == 0 {
        return Ok(Value::Nil);
    }
    Ok(u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map_or(Value::Nil, Value::from))
}
