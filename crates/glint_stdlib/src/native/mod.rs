//! Native intrinsic implementations.
//!
//! Functions are grouped by category:
//! - `generics`: Conversions, printing, hashing, ranges and random numbers
//! - `collection`: Polymorphic list/map/string operations
//! - `string`: String-only operations and regex helpers
//! - `math`: Numeric and bitwise functions
//! - `schedule`: Suspending functions (`wait`, `yield`)
//!
//! Every function receives its arguments already bound to its declared
//! parameters, so `args[i]` is the i-th parameter (defaults filled in).
//! Direct callers may pass fewer; missing arguments read as nil.

#[allow(clippy::unnecessary_wraps)]
#[allow(clippy::match_same_arms)]
mod collection;
#[allow(clippy::unnecessary_wraps)]
mod generics;
#[allow(clippy::unnecessary_wraps)]
mod math;
mod schedule;
#[allow(clippy::unnecessary_wraps)]
mod string;

#[allow(clippy::wildcard_imports)]
pub(crate) use collection::*;
#[allow(clippy::wildcard_imports)]
pub(crate) use generics::*;
#[allow(clippy::wildcard_imports)]
pub(crate) use math::*;
#[allow(clippy::wildcard_imports)]
pub(crate) use schedule::*;
#[allow(clippy::wildcard_imports)]
pub(crate) use string::*;

use glint_foundation::{Error, Result, Type, Value};

use crate::registry::{NativeFn, Param};

const SELF: Param = Param::required("self");
const VALUE_ZERO: Param = Param::number("value", 0.0);

/// Every standard function with its declared parameters.
pub(crate) const STANDARD_FUNCTIONS: &[NativeFn] = &[
    // Generics
    NativeFn::sync("print", &[Param::text("value", "")], native_print),
    NativeFn::suspend("wait", &[Param::number("delay", 1.0)], native_wait),
    NativeFn::suspend("yield", &[], native_yield),
    NativeFn::sync("char", &[Param::number("code", 65.0)], native_char),
    NativeFn::sync("code", &[Param::required("value")], native_code),
    NativeFn::sync("str", &[Param::required("value")], native_str),
    NativeFn::sync("val", &[Param::required("value")], native_val),
    NativeFn::sync(
        "hash",
        &[Param::required("value"), Param::number("recursionDepth", 16.0)],
        native_hash,
    ),
    NativeFn::sync(
        "range",
        &[Param::number("from", 0.0), Param::number("to", 0.0), Param::nil("step")],
        native_range,
    ),
    NativeFn::sync("rnd", &[Param::nil("seed")], native_rnd),
    // Math
    NativeFn::sync("abs", &[VALUE_ZERO], native_abs),
    NativeFn::sync("acos", &[VALUE_ZERO], native_acos),
    NativeFn::sync("asin", &[VALUE_ZERO], native_asin),
    NativeFn::sync("atan", &[VALUE_ZERO], native_atan),
    NativeFn::sync("tan", &[VALUE_ZERO], native_tan),
    NativeFn::sync("ceil", &[VALUE_ZERO], native_ceil),
    NativeFn::sync("cos", &[VALUE_ZERO], native_cos),
    NativeFn::sync("floor", &[VALUE_ZERO], native_floor),
    NativeFn::sync("sin", &[VALUE_ZERO], native_sin),
    NativeFn::sync("sign", &[VALUE_ZERO], native_sign),
    NativeFn::sync("sqrt", &[VALUE_ZERO], native_sqrt),
    NativeFn::sync("log", &[VALUE_ZERO, Param::number("base", 10.0)], native_log),
    NativeFn::sync(
        "round",
        &[VALUE_ZERO, Param::number("decimalPlaces", 0.0)],
        native_round,
    ),
    NativeFn::sync("pi", &[], native_pi),
    NativeFn::sync(
        "bitwise",
        &[Param::required("operator"), Param::required("numA"), Param::nil("numB")],
        native_bitwise,
    ),
    // Collections
    NativeFn::sync("hasIndex", &[SELF, Param::required("index")], native_has_index),
    NativeFn::sync(
        "indexOf",
        &[SELF, Param::required("value"), Param::nil("after")],
        native_index_of,
    ),
    NativeFn::sync(
        "lastIndexOf",
        &[SELF, Param::required("value"), Param::nil("before")],
        native_last_index_of,
    ),
    NativeFn::sync("indexes", &[SELF], native_indexes),
    NativeFn::sync("values", &[SELF], native_values),
    NativeFn::sync("len", &[SELF], native_len),
    NativeFn::sync(
        "slice",
        &[SELF, Param::number("from", 0.0), Param::number("to", 0.0)],
        native_slice,
    ),
    NativeFn::sync(
        "insert",
        &[SELF, Param::required("index"), Param::required("value")],
        native_insert,
    ),
    NativeFn::sync(
        "sort",
        &[SELF, Param::nil("key"), Param::number("asc", 1.0)],
        native_sort,
    ),
    NativeFn::sync("sum", &[SELF], native_sum),
    NativeFn::sync("shuffle", &[SELF], native_shuffle),
    NativeFn::sync("pop", &[SELF], native_pop),
    NativeFn::sync("pull", &[SELF], native_pull),
    NativeFn::sync("push", &[SELF, Param::required("value")], native_push),
    NativeFn::sync("remove", &[SELF, Param::required("key")], native_remove),
    NativeFn::sync("reverse", &[SELF], native_reverse),
    NativeFn::sync("join", &[SELF, Param::text("separator", " ")], native_join),
    NativeFn::sync(
        "replace",
        &[
            SELF,
            Param::required("old"),
            Param::required("new"),
            Param::nil("maxCount"),
            Param::nil("regexOptions"),
        ],
        native_replace,
    ),
    // Strings
    NativeFn::sync("lower", &[SELF], native_lower),
    NativeFn::sync("upper", &[SELF], native_upper),
    NativeFn::sync(
        "split",
        &[SELF, Param::text("delimiter", " "), Param::nil("regexOptions")],
        native_split,
    ),
    NativeFn::sync("trim", &[SELF], native_trim),
    NativeFn::sync("to_int", &[SELF], native_to_int),
];

/// Returns argument `index`, or nil when absent.
pub(crate) fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Nil)
}

/// Builds a type mismatch against the actual variant of `value`.
pub(crate) fn type_error(expected: Type, value: &Value) -> Error {
    Error::type_mismatch(expected, value.value_type())
}

/// Converts an argument to a number, failing for nil and containers.
pub(crate) fn number_arg(args: &[Value], index: usize) -> Result<f64> {
    let value = arg(args, index);
    value.to_number().ok_or_else(|| type_error(Type::Number, &value))
}

/// Converts an argument to an integer, failing for nil and containers.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn int_arg(args: &[Value], index: usize) -> Result<i64> {
    number_arg(args, index).map(|n| n as i64)
}

/// Converts a collection length to a script number.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn len_value(len: usize) -> Value {
    Value::Number(len as f64)
}
