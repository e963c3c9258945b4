//! Error types for glint intrinsics.
//!
//! Every `Err` produced by this workspace is fatal to the calling script:
//! the host aborts the current evaluation and reports the message. Soft
//! failures are expressed as ordinary return values (usually nil).

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// Result type for glint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for glint operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a call frame onto this error's context, creating it if needed.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an index/range error.
    #[must_use]
    pub fn index_out_of_range(desc: impl Into<String>, index: f64, min: f64, max: f64) -> Self {
        Self::new(ErrorKind::IndexOutOfRange {
            desc: desc.into(),
            index,
            min,
            max,
        })
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(function: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument {
            function: function.to_string(),
            message: message.into(),
        })
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(function: &str, expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch {
            function: function.to_string(),
            expected,
            actual,
        })
    }

    /// Creates a limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(limit: Limit) -> Self {
        Self::new(ErrorKind::LimitExceeded(limit))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An argument had the wrong variant.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// An index or bounded numeric argument fell outside its allowed range.
    #[error("Index Error: {desc} ({index}) out of range ({min} to {max})")]
    IndexOutOfRange {
        /// What the number describes (`index`, `delay`, ...).
        desc: String,
        /// The offending value.
        index: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// An argument had the right variant but an unusable value.
    #[error("{function}: {message}")]
    InvalidArgument {
        /// The function that rejected the argument.
        function: String,
        /// Human-readable reason.
        message: String,
    },

    /// Too many arguments, or a required argument was missing.
    #[error("{function}: expected {expected} arguments, got {actual}")]
    ArityMismatch {
        /// The function being bound.
        function: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        actual: usize,
    },

    /// A size ceiling was exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(Limit),

    /// No function with this name is registered.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// A suspending function was invoked through a synchronous entry point.
    #[error("{0} suspends and must be awaited")]
    WouldSuspend(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Size ceilings that bound the cost of a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Limit {
    /// Collection too large to shuffle.
    ShuffleLength {
        /// The configured limit.
        limit: usize,
        /// The collection length.
        actual: usize,
    },
    /// Join separator too long.
    SeparatorLength {
        /// The configured limit.
        limit: usize,
        /// The separator length in characters.
        actual: usize,
    },
    /// Range would produce too many values.
    RangeLength {
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShuffleLength { limit, actual } => {
                write!(f, "cannot shuffle {actual} entries (max {limit})")
            }
            Self::SeparatorLength { limit, actual } => {
                write!(f, "separator of {actual} characters is too long (max {limit})")
            }
            Self::RangeLength { limit } => {
                write!(f, "range would produce more than {limit} values")
            }
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Stack of intrinsic calls, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.stack {
            writeln!(f, "  in {frame}")?;
        }
        Ok(())
    }
}
