//! Glint - Standard-library intrinsics for embedded script interpreters
//!
//! This crate re-exports both layers for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: glint_stdlib     - Function registry, context, natives, seeded random
//! Layer 0: glint_foundation - Value model, deep equality/hashing, indices, errors
//! ```

pub use glint_foundation as foundation;
pub use glint_stdlib as stdlib;
