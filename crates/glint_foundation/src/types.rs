//! Type descriptors used in error reporting and argument validation.

use std::fmt;

/// Describes a value variant, or a family of variants an operation accepts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Double-precision number.
    Number,
    /// Unicode string.
    String,
    /// Boolean.
    Boolean,
    /// Mutable, shared list.
    List,
    /// Mutable, shared, insertion-ordered map.
    Map,
    /// A list or a string.
    Sequence,
    /// A list, a map, or a string.
    Collection,
    /// Any value.
    Any,
}

impl Type {
    /// Returns true if a value of type `actual` satisfies this descriptor.
    #[must_use]
    pub fn accepts(self, actual: Type) -> bool {
        match self {
            Self::Any => true,
            Self::Sequence => matches!(actual, Self::List | Self::String),
            Self::Collection => matches!(actual, Self::List | Self::Map | Self::String),
            _ => self == actual,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nil => "nil",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Map => "map",
            Self::Sequence => "list or string",
            Self::Collection => "list, map or string",
            Self::Any => "any",
        };
        f.write_str(name)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
