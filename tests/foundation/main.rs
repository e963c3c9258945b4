//! Integration tests for Layer 0: Foundation
//!
//! Tests for the value model, deep equality and hashing, index utilities
//! and errors.

mod equality;
mod errors;
mod index;
mod values;
