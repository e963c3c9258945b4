//! Integration tests for numeric and bitwise intrinsics

use glint_foundation::{ErrorKind, Value};

use crate::call;

fn num(n: f64) -> Value {
    Value::from(n)
}

#[test]
fn defaults_apply() {
    assert_eq!(call("abs", vec![]).unwrap(), num(0.0));
    assert_eq!(call("cos", vec![]).unwrap(), num(1.0));
    assert_eq!(call("round", vec![num(2.4)]).unwrap(), num(2.0));
    assert_eq!(call("pi", vec![]).unwrap(), num(std::f64::consts::PI));
}

#[test]
fn round_decimal_places() {
    assert_eq!(call("round", vec![num(1.005), num(2.0)]).unwrap(), num(1.01));
    assert_eq!(call("round", vec![num(-1.5)]).unwrap(), num(-2.0));
    let err = call("round", vec![num(1.0), num(20.0)]).unwrap_err();
    assert!(err.to_string().contains("decimalPlaces"));
}

#[test]
fn numeric_strings_are_accepted() {
    assert_eq!(call("sqrt", vec![Value::from("16")]).unwrap(), num(4.0));
    assert!(call("sqrt", vec![Value::from("x")]).unwrap().as_number().unwrap().is_nan());
}

#[test]
fn bitwise_left_shift() {
    assert_eq!(call("bitwise", vec![Value::from("<<"), num(1.0), num(3.0)]).unwrap(), num(8.0));
}

#[test]
fn bitwise_unsigned_shift_of_negative_one() {
    // 2^64 - 1 is not representable and rounds to 2^64.
    let out = call("bitwise", vec![Value::from(">>>"), num(-1.0), num(0.0)]).unwrap();
    assert_eq!(out, num(18_446_744_073_709_551_616.0));
}

#[test]
fn bitwise_arithmetic_shift_keeps_sign() {
    let out = call("bitwise", vec![Value::from(">>"), num(-1024.0), num(3.0)]).unwrap();
    assert_eq!(out, num(-128.0));
}

#[test]
fn bitwise_shift_amount_wraps() {
    let out = call("bitwise", vec![Value::from("<<"), num(3.0), num(65.0)]).unwrap();
    assert_eq!(out, num(6.0));
}

#[test]
fn bitwise_beyond_32_bits() {
    let big = 2f64.powi(40) + 5.0;
    let out = call("bitwise", vec![Value::from("|"), num(big), num(2.0)]).unwrap();
    assert_eq!(out, num(2f64.powi(40) + 7.0));
}

#[test]
fn bitwise_missing_operand_is_fatal() {
    let err = call("bitwise", vec![Value::from("&"), num(1.0)]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn hash_of_empty_string_is_zero() {
    assert_eq!(call("hash", vec![Value::from("")]).unwrap(), num(0.0));
    let a = call("hash", vec![Value::from("a")]).unwrap();
    assert_eq!(call("hash", vec![Value::from("a")]).unwrap(), a);
}

#[test]
fn range_through_registry() {
    assert_eq!(
        call("range", vec![num(1.0), num(5.0), num(1.0)]).unwrap(),
        Value::from(vec![1, 2, 3, 4, 5])
    );
    assert_eq!(call("range", vec![num(5.0), num(1.0)]).unwrap(), Value::from(vec![5, 4, 3, 2, 1]));
    assert!(call("range", vec![num(0.0), num(1.0), num(0.0)]).is_err());
    assert_eq!(call("range", vec![]).unwrap(), Value::from(vec![0]));
}
