//! Integration tests for the function registry

use glint_foundation::{ErrorKind, Result, Value};
use glint_stdlib::{
    BufferHandler, CallArgs, Context, Intrinsics, Limits, MethodTable, NativeFn, Param,
};

fn shout(_ctx: &mut Context, args: &[Value]) -> Result<Value> {
    Ok(Value::from(format!("{}!", args[0])))
}

#[test]
fn standard_registers_documented_names() {
    let names = Intrinsics::standard().names();
    for name in [
        "print", "wait", "yield", "char", "code", "str", "val", "hash", "range", "abs", "acos",
        "asin", "atan", "tan", "ceil", "cos", "floor", "sin", "sign", "sqrt", "log", "round",
        "pi", "bitwise", "rnd", "hasIndex", "indexOf", "lastIndexOf", "indexes", "values", "len",
        "lower", "upper", "slice", "insert", "sort", "sum", "shuffle", "pop", "pull", "push",
        "remove", "reverse", "join", "split", "replace", "trim", "to_int",
    ] {
        assert!(names.contains(&name), "missing {name}");
    }
}

#[test]
fn named_arguments_bind_by_name() {
    let intrinsics = Intrinsics::standard();
    let mut ctx = Context::new();
    let args = CallArgs::new().named("to", 3).named("from", 1);
    let out = intrinsics.call_sync(&mut ctx, "range", args).unwrap();
    assert_eq!(out, Value::from(vec![1, 2, 3]));
}

#[test]
fn unknown_function_is_reported() {
    let intrinsics = Intrinsics::standard();
    let err = intrinsics
        .call_sync(&mut Context::new(), "nope", CallArgs::new())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownFunction(_)));
}

#[test]
fn surplus_arguments_are_rejected() {
    let intrinsics = Intrinsics::standard();
    let args = CallArgs::new().arg(1).arg(2);
    let err = intrinsics.call_sync(&mut Context::new(), "pi", args).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ArityMismatch { .. }));
}

#[test]
fn custom_methods_can_be_added() {
    const PARAMS: &[Param] = &[Param::required("self")];
    let mut intrinsics = Intrinsics::standard();
    intrinsics.register_method(MethodTable::String, NativeFn::sync("shout", PARAMS, shout));
    let out = intrinsics
        .call_method(&mut Context::new(), &Value::from("hey"), "shout", CallArgs::new())
        .unwrap();
    assert_eq!(out, Value::from("hey!"));
}

#[test]
fn print_goes_to_output_handler() {
    let buffer = BufferHandler::new();
    let mut ctx = Context::new().with_output(buffer.clone());
    let intrinsics = Intrinsics::standard();
    intrinsics.call_sync(&mut ctx, "print", CallArgs::new().arg("hi")).unwrap();
    intrinsics.call_sync(&mut ctx, "print", CallArgs::new()).unwrap();
    assert_eq!(buffer.lines(), vec!["hi".to_string(), String::new()]);
}

#[test]
fn limits_are_configurable() {
    let limits = Limits::default().with_max_shuffle_len(2).with_max_separator_len(1);
    let mut ctx = Context::new().with_limits(limits);
    let intrinsics = Intrinsics::standard();
    let l = Value::from(vec![1, 2, 3]);
    let err = intrinsics
        .call_sync(&mut ctx, "shuffle", CallArgs::new().arg(l.clone()))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
    let err = intrinsics
        .call_sync(&mut ctx, "join", CallArgs::new().arg(l).arg("--"))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::LimitExceeded(_)));
}
