//! Integration tests for Layer 1: Standard library
//!
//! Tests the intrinsics through the registry, the way a host calls them.

mod math;
mod registry;
mod scheduling;
mod strings;

use glint_foundation::{Result, Value};
use glint_stdlib::{CallArgs, Context, Intrinsics};

/// Calls a global function with positional arguments on a fresh context.
pub fn call(name: &str, args: Vec<Value>) -> Result<Value> {
    call_with(&mut Context::new().with_rng_seed(42), name, args)
}

/// Calls a global function with positional arguments on `ctx`.
pub fn call_with(ctx: &mut Context, name: &str, args: Vec<Value>) -> Result<Value> {
    Intrinsics::standard().call_sync(ctx, name, CallArgs::from(args))
}

/// Calls a method on `receiver` with positional arguments.
pub fn method(receiver: &Value, name: &str, args: Vec<Value>) -> Result<Value> {
    let mut ctx = Context::new().with_rng_seed(42);
    Intrinsics::standard().call_method(&mut ctx, receiver, name, CallArgs::from(args))
}

/// Builds a list value from anything convertible.
pub fn list<T: Into<Value>>(items: Vec<T>) -> Value {
    Value::from(items)
}
