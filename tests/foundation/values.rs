//! Integration tests for Value types
//!
//! Tests construction, conversions, truthiness, display and reference semantics.

use glint_foundation::{List, Map, Type, Value, format_number, parse_number};

// =============================================================================
// Conversions
// =============================================================================

#[test]
fn value_types() {
    assert_eq!(Value::Nil.value_type(), Type::Nil);
    assert_eq!(Value::from(1).value_type(), Type::Number);
    assert_eq!(Value::from("a").value_type(), Type::String);
    assert_eq!(Value::from(true).value_type(), Type::Boolean);
    assert_eq!(Value::from(List::new()).value_type(), Type::List);
    assert_eq!(Value::from(Map::new()).value_type(), Type::Map);
}

#[test]
fn to_number_of_each_variant() {
    assert_eq!(Value::from(2.5).to_number(), Some(2.5));
    assert_eq!(Value::from(true).to_number(), Some(1.0));
    assert_eq!(Value::from(" 12 ").to_number(), Some(12.0));
    assert!(Value::from("12abc").to_number().unwrap().is_nan());
    assert_eq!(Value::Nil.to_number(), None);
    assert_eq!(Value::from(List::new()).to_number(), None);
}

#[test]
fn to_int_truncates() {
    assert_eq!(Value::from(3.9).to_int(), Some(3));
    assert_eq!(Value::from(-3.9).to_int(), Some(-3));
    assert_eq!(Value::from("abc").to_int(), Some(0));
}

#[test]
fn parse_number_literals() {
    assert_eq!(parse_number("0x1f"), 31.0);
    assert_eq!(parse_number("0b101"), 5.0);
    assert_eq!(parse_number("-1.5e2"), -150.0);
    assert_eq!(parse_number("Infinity"), f64::INFINITY);
    assert!(parse_number("").is_nan());
    assert!(parse_number("-0x10").is_nan());
}

#[test]
fn truthiness() {
    for falsy in [
        Value::Nil,
        Value::from(0),
        Value::from(f64::NAN),
        Value::from(""),
        Value::from(false),
        Value::from(List::new()),
        Value::from(Map::new()),
    ] {
        assert!(!falsy.is_truthy(), "{falsy:?} should be falsy");
    }
    assert!(Value::from("0").is_truthy());
    assert!(Value::from(vec![0]).is_truthy());
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn number_display() {
    assert_eq!(format_number(1.0), "1");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(0.5), "0.5");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn nested_display_quotes_strings() {
    let map: Map = [(Value::from("k"), Value::from(vec![Value::from("v"), Value::Nil]))]
        .into_iter()
        .collect();
    assert_eq!(Value::from(map).to_string(), r#"{"k": ["v", null]}"#);
    assert_eq!(Value::from("top").to_string(), "top");
}

#[test]
fn cyclic_display_terminates() {
    let list = List::new();
    list.push(Value::from(list.clone()));
    let text = Value::from(list).to_string();
    assert!(text.contains("[...]"));
}

// =============================================================================
// Reference Semantics
// =============================================================================

#[test]
fn list_aliases_share_storage() {
    let a = Value::from(vec![1, 2]);
    let b = a.clone();
    b.as_list().unwrap().push(Value::from(3));
    assert_eq!(a.as_list().unwrap().len(), 3);
}

#[test]
fn map_keeps_insertion_order() {
    let map = Map::new();
    map.insert(Value::from("z"), Value::from(1));
    map.insert(Value::from("a"), Value::from(2));
    map.insert(Value::from("z"), Value::from(3));
    assert_eq!(map.keys(), vec![Value::from("z"), Value::from("a")]);
    assert_eq!(map.get(&Value::from("z")), Some(Value::from(3)));
}

#[test]
fn map_keys_use_deep_equality() {
    let map = Map::new();
    map.insert(Value::from(vec![1, 2]), Value::from("list"));
    assert_eq!(map.get(&Value::from(vec![1, 2])), Some(Value::from("list")));
    map.insert(Value::from(1), Value::from("one"));
    assert_eq!(map.get(&Value::from("1")), Some(Value::from("one")));
}
