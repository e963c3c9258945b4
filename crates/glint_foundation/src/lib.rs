//! Value model, deep equality/hashing, and index utilities for glint.
//!
//! This crate provides:
//! - [`Value`] - The dynamic value every intrinsic consumes and produces
//! - [`List`] and [`Map`] - Shared, mutable collections with reference semantics
//! - [`deep_equal`] and [`deep_hash`] - Structural comparison used by every container operation
//! - [`normalize_index`], [`check_range`] and [`range`] - Index and range utilities
//! - [`Error`] - Fatal error type with categorized kinds
//! - [`Type`] - Variant descriptors for error reporting

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod equality;
pub mod error;
pub mod index;
pub mod types;
pub mod value;

pub use collections::{List, Map};
pub use equality::{DEFAULT_HASH_DEPTH, deep_equal, deep_hash, hash_code, string_hash, to_int32};
pub use error::{Error, ErrorContext, ErrorKind, Limit, Result};
pub use index::{check_range, normalize_index, range, resolve_index};
pub use types::Type;
pub use value::{Value, format_number, parse_number};
