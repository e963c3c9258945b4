//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use glint_foundation::{Error, ErrorKind, Limit, Type};

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch(Type::Number, Type::List);
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(format!("{err}"), "type mismatch: expected number, got list");
}

#[test]
fn error_invalid_argument_names_function() {
    let err = Error::invalid_argument("push", "key map cannot be null");
    assert_eq!(format!("{err}"), "push: key map cannot be null");
}

#[test]
fn error_limit_exceeded() {
    let err = Error::limit_exceeded(Limit::SeparatorLength { limit: 128, actual: 200 });
    let msg = format!("{err}");
    assert!(msg.contains("128"));
    assert!(msg.contains("200"));
}

#[test]
fn error_context_frames() {
    let err = Error::arity_mismatch("len", 1, 2).in_frame("len");
    let context = err.context.unwrap();
    assert_eq!(context.stack, vec!["len".to_string()]);
    assert_eq!(format!("{context}"), "  in len\n");
}
