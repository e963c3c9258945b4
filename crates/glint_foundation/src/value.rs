//! Core value type for all data a script manipulates.

use std::fmt;
use std::sync::Arc;

use crate::collections::{List, Map};
use crate::equality::deep_equal;
use crate::types::Type;

/// Nesting depth past which the canonical string form is elided.
const MAX_DISPLAY_DEPTH: usize = 16;

/// A dynamic script value.
///
/// `Number`, `String`, `Boolean` and `Nil` are value types: operations that
/// "modify" them return a new `Value`. `List` and `Map` are reference types:
/// cloning the `Value` aliases the same storage.
#[derive(Clone)]
pub enum Value {
    /// The nil value (represents absence).
    Nil,
    /// Double-precision number.
    Number(f64),
    /// Immutable Unicode string.
    String(Arc<str>),
    /// Boolean value.
    Boolean(bool),
    /// Shared mutable list.
    List(List),
    /// Shared mutable insertion-ordered map.
    Map(Map),
}

impl Value {
    /// Returns the type of this value.
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Nil => Type::Nil,
            Self::Number(_) => Type::Number,
            Self::String(_) => Type::String,
            Self::Boolean(_) => Type::Boolean,
            Self::List(_) => Type::List,
            Self::Map(_) => Type::Map,
        }
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns true if this value is truthy.
    ///
    /// Nil, `false`, `0`, `NaN`, the empty string, and empty lists and maps
    /// are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Boolean(b) => *b,
            Self::List(l) => !l.is_empty(),
            Self::Map(m) => !m.is_empty(),
        }
    }

    /// Converts to a number.
    ///
    /// Returns `None` for nil and containers. Strings that are not a numeric
    /// literal convert to `NaN`, leaving the caller to decide whether that is
    /// an error or a zero.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::String(s) => Some(parse_number(s)),
            Self::Nil | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Converts to an integer by truncating [`Value::to_number`].
    ///
    /// `NaN` truncates to 0; out-of-range values saturate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_int(&self) -> Option<i64> {
        self.to_number().map(|n| n as i64)
    }

    /// Attempts to extract a number without conversion.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a list handle.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Attempts to extract a map handle.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Parses a whole (trimmed) string as a numeric literal.
///
/// Accepts decimal literals with optional sign, fraction and exponent,
/// `0x`/`0b`/`0o` integer literals and `Infinity`. Everything else,
/// including the empty string, is `NaN`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let radix = match unsigned.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0b" | "0B") => Some(2),
        Some("0o" | "0O") => Some(8),
        _ => None,
    };
    let magnitude = if let Some(radix) = radix {
        // Signed radix literals are not numeric.
        if text.len() != unsigned.len() {
            return f64::NAN;
        }
        u64::from_str_radix(&unsigned[2..], radix).map_or(f64::NAN, |n| n as f64)
    } else if unsigned == "Infinity" {
        f64::INFINITY
    } else if !unsigned.is_empty()
        && unsigned
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        unsigned.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        return f64::NAN;
    };
    if negative { -magnitude } else { magnitude }
}

/// Formats a number in its canonical script form.
///
/// Integral values print without a fraction, `-0` prints as `0`, and
/// non-finite values print as `NaN`, `Infinity` or `-Infinity`.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, depth: usize, quoted: bool) -> fmt::Result {
    match value {
        Value::Nil => f.write_str("null"),
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::Boolean(b) => write!(f, "{b}"),
        Value::String(s) if quoted => write!(f, "\"{s}\""),
        Value::String(s) => f.write_str(s),
        Value::List(_) if depth >= MAX_DISPLAY_DEPTH => f.write_str("[...]"),
        Value::Map(_) if depth >= MAX_DISPLAY_DEPTH => f.write_str("{...}"),
        Value::List(list) => {
            f.write_str("[")?;
            for (i, item) in list.snapshot().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, depth + 1, true)?;
            }
            f.write_str("]")
        }
        Value::Map(map) => {
            f.write_str("{")?;
            for (i, (k, v)) in map.entries().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, k, depth + 1, true)?;
                f.write_str(": ")?;
                write_value(f, v, depth + 1, true)?;
            }
            f.write_str("}")
        }
    }
}

/// The canonical string form: strings print raw at the top level and
/// quoted when nested inside a list or map.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, 0, false)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, 0, true)
    }
}

/// Deep structural equality, see [`deep_equal`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::String(c.to_string().into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}
