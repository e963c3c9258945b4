//! Integration tests for string intrinsics

use glint_foundation::{ErrorKind, Value};

use crate::{call, list, method};

#[test]
fn split_literal() {
    assert_eq!(
        method(&Value::from("a b c"), "split", vec![]).unwrap(),
        list(vec!["a", "b", "c"])
    );
    assert_eq!(
        call("split", vec![Value::from("1,2"), Value::from(",")]).unwrap(),
        list(vec!["1", "2"])
    );
}

#[test]
fn split_regex_case_insensitive() {
    let parts = call(
        "split",
        vec![Value::from("aXbxc"), Value::from("x"), Value::from("i")],
    )
    .unwrap();
    assert_eq!(parts, list(vec!["a", "b", "c"]));
}

#[test]
fn invalid_regex_option_is_fatal() {
    let err = call("split", vec![Value::from("abc"), Value::from("b"), Value::from("z")]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArgument { .. }));
}

#[test]
fn replace_all_and_bounded() {
    let s = Value::from("a.b.c");
    assert_eq!(
        method(&s, "replace", vec![Value::from("."), Value::from("-")]).unwrap(),
        Value::from("a-b-c")
    );
    assert_eq!(
        method(&s, "replace", vec![Value::from("."), Value::from("-"), Value::from(1)]).unwrap(),
        Value::from("a-b.c")
    );
    assert_eq!(s, Value::from("a.b.c"));
}

#[test]
fn replace_with_regex() {
    let out = call(
        "replace",
        vec![
            Value::from("a1b22"),
            Value::from("[0-9]+"),
            Value::from("#"),
            Value::Nil,
            Value::from("g"),
        ],
    )
    .unwrap();
    assert_eq!(out, Value::from("a#b#"));
}

#[test]
fn string_positions_are_characters() {
    let s = Value::from("naïve");
    assert_eq!(method(&s, "len", vec![]).unwrap(), Value::from(5));
    assert_eq!(method(&s, "indexOf", vec![Value::from("v")]).unwrap(), Value::from(3));
    assert_eq!(method(&s, "slice", vec![Value::from(2), Value::from(4)]).unwrap(), Value::from("ïv"));
    assert_eq!(method(&s, "values", vec![]).unwrap(), list(vec!["n", "a", "ï", "v", "e"]));
}

#[test]
fn insert_and_remove_return_new_strings() {
    let s = Value::from("held");
    assert_eq!(method(&s, "insert", vec![Value::from(3), Value::from("l")]).unwrap(), Value::from("helld"));
    assert_eq!(method(&s, "remove", vec![Value::from("l")]).unwrap(), Value::from("hed"));
    assert_eq!(s, Value::from("held"));
}

#[test]
fn conversions() {
    assert_eq!(method(&Value::from(" 7 "), "trim", vec![]).unwrap(), Value::from("7"));
    assert_eq!(method(&Value::from("0x10"), "to_int", vec![]).unwrap(), Value::from(16));
    assert_eq!(method(&Value::from("12"), "val", vec![]).unwrap(), Value::from(12));
    assert_eq!(method(&Value::from("Ab"), "upper", vec![]).unwrap(), Value::from("AB"));
    assert_eq!(method(&Value::from("a"), "code", vec![]).unwrap(), Value::from(97));
    assert_eq!(call("char", vec![]).unwrap(), Value::from("A"));
    assert_eq!(call("str", vec![list(vec![1, 2])]).unwrap(), Value::from("[1, 2]"));
}
