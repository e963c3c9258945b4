//! Integration tests for deep equality and hashing
//!
//! Tests structural equality, depth-bounded hashing and their consistency.

use glint_foundation::{DEFAULT_HASH_DEPTH, List, Map, Value, deep_equal, deep_hash, string_hash};
use proptest::prelude::*;

fn nested(depth: usize, leaf: i32) -> Value {
    (0..depth).fold(Value::from(leaf), |inner, _| Value::from(vec![inner]))
}

// =============================================================================
// Equality
// =============================================================================

#[test]
fn lists_compare_elementwise() {
    assert!(deep_equal(&Value::from(vec![1, 2]), &Value::from(vec![1, 2])));
    assert!(!deep_equal(&Value::from(vec![1, 2]), &Value::from(vec![2, 1])));
    assert!(!deep_equal(&Value::from(vec![1]), &Value::from(vec![1, 1])));
}

#[test]
fn maps_ignore_insertion_order() {
    let a: Map = [(Value::from("x"), Value::from(1)), (Value::from("y"), Value::from(2))]
        .into_iter()
        .collect();
    let b: Map = [(Value::from("y"), Value::from(2)), (Value::from("x"), Value::from(1))]
        .into_iter()
        .collect();
    assert!(deep_equal(&Value::from(a), &Value::from(b)));
}

#[test]
fn scalars_compare_by_string_form() {
    assert!(deep_equal(&Value::from(1), &Value::from("1")));
    assert!(deep_equal(&Value::from(true), &Value::from("true")));
    assert!(!deep_equal(&Value::from(1), &Value::from("01")));
}

#[test]
fn self_referencing_list_equals_itself() {
    let list = List::new();
    list.push(Value::from(list.clone()));
    let value = Value::from(list);
    assert!(deep_equal(&value, &value.clone()));
}

// =============================================================================
// Hashing
// =============================================================================

#[test]
fn string_hash_vectors() {
    assert_eq!(string_hash(""), 0);
    assert_eq!(string_hash("a"), 97);
    assert_eq!(string_hash("abc"), 96354);
    assert_eq!(string_hash("hello"), 99_162_322);
    assert_eq!(string_hash("Hello World"), -862_545_276);
}

#[test]
fn hash_is_stable() {
    let v = Value::from(vec![Value::from("a"), Value::from(2)]);
    assert_eq!(deep_hash(&v, DEFAULT_HASH_DEPTH), deep_hash(&v, DEFAULT_HASH_DEPTH));
}

#[test]
fn hash_ignores_structure_below_cutoff() {
    let a = nested(4, 1);
    let b = nested(4, 2);
    assert!(!deep_equal(&a, &b));
    assert_eq!(deep_hash(&a, 2), deep_hash(&b, 2));
}

#[test]
fn cyclic_hash_terminates() {
    let list = List::new();
    list.push(Value::from(list.clone()));
    let _ = deep_hash(&Value::from(list), DEFAULT_HASH_DEPTH);
}

// =============================================================================
// Properties
// =============================================================================

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::from),
        (-1000i32..1000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::vec(("[a-z]{1,3}", inner), 0..4).prop_map(|pairs| {
                let map: Map = pairs.into_iter().map(|(k, v)| (Value::from(k), v)).collect();
                Value::from(map)
            }),
        ]
    })
}

fn deep_copy(value: &Value) -> Value {
    match value {
        Value::List(l) => l.snapshot().iter().map(deep_copy).collect::<List>().into(),
        Value::Map(m) => m
            .entries()
            .iter()
            .map(|(k, v)| (deep_copy(k), deep_copy(v)))
            .collect::<Map>()
            .into(),
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn equality_is_reflexive(v in value()) {
        prop_assert!(deep_equal(&v, &v));
    }

    #[test]
    fn equality_is_symmetric(a in value(), b in value()) {
        prop_assert_eq!(deep_equal(&a, &b), deep_equal(&b, &a));
    }

    #[test]
    fn equal_values_hash_equal(v in value(), depth in 0i32..20) {
        let copy = deep_copy(&v);
        prop_assert!(deep_equal(&v, &copy));
        prop_assert_eq!(deep_hash(&v, depth), deep_hash(&copy, depth));
    }
}
