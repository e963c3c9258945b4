//! Integration tests for index normalization and ranges

use glint_foundation::{ErrorKind, check_range, normalize_index, range};

#[test]
fn negative_indices_count_from_end() {
    assert_eq!(normalize_index(-1, 5), Some(4));
    assert_eq!(normalize_index(5, 5), None);
    assert_eq!(normalize_index(-6, 5), None);
}

#[test]
fn check_range_reports_bounds() {
    let err = check_range(-1.0, 0.0, 15.0, "decimalPlaces").unwrap_err();
    assert_eq!(err.to_string(), "Index Error: decimalPlaces (-1) out of range (0 to 15)");
}

#[test]
fn range_inclusive_ascending() {
    assert_eq!(range(1.0, 5.0, Some(1.0), 1000).unwrap(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn range_auto_signed_descending() {
    assert_eq!(range(5.0, 1.0, None, 1000).unwrap(), vec![5.0, 4.0, 3.0, 2.0, 1.0]);
}

#[test]
fn range_step_zero_is_fatal() {
    let err = range(0.0, 0.0, Some(0.0), 1000).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArgument { .. }));
}

#[test]
fn range_step_not_landing_on_end() {
    assert_eq!(range(0.0, 5.0, Some(2.0), 1000).unwrap(), vec![0.0, 2.0, 4.0]);
}

#[test]
fn range_non_finite_bounds_fail() {
    assert!(range(0.0, f64::INFINITY, None, 1000).is_err());
    assert!(range(f64::NAN, 1.0, None, 1000).is_err());
}
