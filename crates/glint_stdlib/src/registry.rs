//! Function registry and argument binding.
//!
//! The host looks functions up by name, binds positional and named
//! arguments against the declared parameters, and then invokes the native
//! implementation. Per-variant method tables expose a subset of the global
//! functions with the receiver bound to `self`.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use tracing::{debug, trace};

use glint_foundation::{Error, ErrorKind, Result, Value};

use crate::context::Context;
use crate::native;

/// Future returned by a suspending function.
pub type SuspendFuture<'a> = Pin<Box<dyn Future<Output = Result<Value>> + 'a>>;

/// Signature of a synchronous intrinsic.
pub type SyncFn = fn(&mut Context, &[Value]) -> Result<Value>;

/// Signature of a suspending intrinsic.
pub type SuspendFn = for<'a> fn(&'a Context, &'a [Value]) -> SuspendFuture<'a>;

/// Default applied when an argument is not supplied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamDefault {
    /// The argument must be supplied.
    Required,
    /// Defaults to nil.
    Nil,
    /// Defaults to a number.
    Number(f64),
    /// Defaults to a string.
    Str(&'static str),
}

impl ParamDefault {
    /// The default value, or `None` when the argument is required.
    #[must_use]
    pub fn to_value(self) -> Option<Value> {
        match self {
            Self::Required => None,
            Self::Nil => Some(Value::Nil),
            Self::Number(n) => Some(Value::Number(n)),
            Self::Str(s) => Some(Value::from(s)),
        }
    }
}

/// A declared parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Param {
    /// Name used by named arguments.
    pub name: &'static str,
    /// Value used when the argument is omitted.
    pub default: ParamDefault,
}

impl Param {
    /// A parameter that must be supplied.
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            default: ParamDefault::Required,
        }
    }

    /// A parameter defaulting to nil.
    #[must_use]
    pub const fn nil(name: &'static str) -> Self {
        Self {
            name,
            default: ParamDefault::Nil,
        }
    }

    /// A parameter defaulting to a number.
    #[must_use]
    pub const fn number(name: &'static str, value: f64) -> Self {
        Self {
            name,
            default: ParamDefault::Number(value),
        }
    }

    /// A parameter defaulting to a string.
    #[must_use]
    pub const fn text(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            default: ParamDefault::Str(value),
        }
    }
}

/// Native implementation of a function.
#[derive(Clone, Copy, Debug)]
pub enum NativeImpl {
    /// Runs to completion without suspending.
    Sync(SyncFn),
    /// Suspends at the host's scheduling boundary.
    Suspend(SuspendFn),
}

/// A registered intrinsic.
#[derive(Clone, Copy, Debug)]
pub struct NativeFn {
    /// Script-visible name.
    pub name: &'static str,
    /// Declared parameters, in positional order.
    pub params: &'static [Param],
    /// The implementation.
    pub func: NativeImpl,
}

impl NativeFn {
    /// Declares a synchronous function.
    #[must_use]
    pub const fn sync(name: &'static str, params: &'static [Param], func: SyncFn) -> Self {
        Self {
            name,
            params,
            func: NativeImpl::Sync(func),
        }
    }

    /// Declares a suspending function.
    #[must_use]
    pub const fn suspend(name: &'static str, params: &'static [Param], func: SuspendFn) -> Self {
        Self {
            name,
            params,
            func: NativeImpl::Suspend(func),
        }
    }

    /// Returns true if calling this function may suspend.
    #[must_use]
    pub const fn is_suspending(&self) -> bool {
        matches!(self.func, NativeImpl::Suspend(_))
    }
}

/// Arguments as supplied by the caller, before binding.
#[derive(Clone, Debug, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl CallArgs {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to append a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Builder method to add a named argument.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    fn with_receiver(mut self, receiver: Value) -> Self {
        self.positional.insert(0, receiver);
        self
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(positional: Vec<Value>) -> Self {
        Self {
            positional,
            named: Vec::new(),
        }
    }
}

/// Binds caller arguments to `params`, filling defaults.
///
/// # Errors
///
/// Fails on surplus positional arguments, unknown or repeated names, and
/// missing required arguments.
pub fn bind(function: &str, params: &[Param], args: CallArgs) -> Result<Vec<Value>> {
    let CallArgs { positional, named } = args;
    if positional.len() > params.len() {
        return Err(Error::arity_mismatch(function, params.len(), positional.len()));
    }

    let mut slots: Vec<Option<Value>> = positional.into_iter().map(Some).collect();
    slots.resize(params.len(), None);

    for (name, value) in named {
        let index = params
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| Error::invalid_argument(function, format!("unknown argument '{name}'")))?;
        if slots[index].is_some() {
            return Err(Error::invalid_argument(
                function,
                format!("argument '{name}' given twice"),
            ));
        }
        slots[index] = Some(value);
    }

    slots
        .into_iter()
        .zip(params)
        .map(|(slot, param)| {
            slot.or_else(|| param.default.to_value()).ok_or_else(|| {
                Error::invalid_argument(
                    function,
                    format!("missing required argument '{}'", param.name),
                )
            })
        })
        .collect()
}

/// Which per-variant method table a receiver uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MethodTable {
    /// Methods on lists.
    List,
    /// Methods on maps.
    Map,
    /// Methods on strings.
    String,
}

impl MethodTable {
    /// The table for `value`, if its variant has one.
    #[must_use]
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::List(_) => Some(Self::List),
            Value::Map(_) => Some(Self::Map),
            Value::String(_) => Some(Self::String),
            Value::Nil | Value::Number(_) | Value::Boolean(_) => None,
        }
    }
}

impl fmt::Display for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Map => write!(f, "map"),
            Self::String => write!(f, "string"),
        }
    }
}

const LIST_METHODS: &[&str] = &[
    "hasIndex", "indexes", "indexOf", "lastIndexOf", "len", "pop", "pull", "push", "insert",
    "shuffle", "sort", "sum", "remove", "values", "reverse", "join", "replace", "slice",
];

const MAP_METHODS: &[&str] = &[
    "hasIndex", "indexes", "indexOf", "lastIndexOf", "len", "pop", "pull", "push", "shuffle",
    "sum", "remove", "values", "replace",
];

const STRING_METHODS: &[&str] = &[
    "hasIndex", "indexes", "indexOf", "lastIndexOf", "code", "len", "lower", "upper", "val",
    "remove", "values", "split", "replace", "trim", "to_int", "insert", "slice",
];

/// Global function table plus per-variant method tables.
#[derive(Clone, Debug, Default)]
pub struct Intrinsics {
    globals: HashMap<&'static str, NativeFn>,
    methods: HashMap<MethodTable, HashMap<&'static str, NativeFn>>,
}

impl Intrinsics {
    /// Creates empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates tables holding the standard library.
    #[must_use]
    pub fn standard() -> Self {
        let mut intrinsics = Self::new();
        for &function in native::STANDARD_FUNCTIONS {
            intrinsics.register(function);
        }
        for (table, names) in [
            (MethodTable::List, LIST_METHODS),
            (MethodTable::Map, MAP_METHODS),
            (MethodTable::String, STRING_METHODS),
        ] {
            for name in names {
                if let Some(function) = intrinsics.globals.get(name).copied() {
                    intrinsics.register_method(table, function);
                }
            }
        }
        intrinsics
    }

    /// Adds or replaces a global function, returning the one it replaced.
    pub fn register(&mut self, function: NativeFn) -> Option<NativeFn> {
        self.globals.insert(function.name, function)
    }

    /// Adds or replaces a method, returning the one it replaced.
    pub fn register_method(&mut self, table: MethodTable, function: NativeFn) -> Option<NativeFn> {
        self.methods
            .entry(table)
            .or_default()
            .insert(function.name, function)
    }

    /// Looks up a global function.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NativeFn> {
        self.globals.get(name)
    }

    /// Looks up a method.
    #[must_use]
    pub fn method(&self, table: MethodTable, name: &str) -> Option<&NativeFn> {
        self.methods.get(&table).and_then(|methods| methods.get(name))
    }

    /// Names of every global function, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.globals.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Calls a global function, awaiting it if it suspends.
    ///
    /// # Errors
    ///
    /// Fails if the function is unknown, binding fails, or the function
    /// itself fails. The error's context names the function.
    pub async fn call(&self, ctx: &mut Context, name: &str, args: CallArgs) -> Result<Value> {
        let function = self.lookup(name)?;
        let bound = bind(function.name, function.params, args).map_err(|e| fail(name, e))?;
        trace!(function = name, "calling intrinsic");
        let result = match function.func {
            NativeImpl::Sync(f) => f(ctx, &bound),
            NativeImpl::Suspend(f) => f(ctx, &bound).await,
        };
        result.map_err(|e| fail(name, e))
    }

    /// Calls a global function that must not suspend.
    ///
    /// # Errors
    ///
    /// As [`Intrinsics::call`], plus `ErrorKind::WouldSuspend` for `wait`
    /// and `yield`.
    pub fn call_sync(&self, ctx: &mut Context, name: &str, args: CallArgs) -> Result<Value> {
        let function = self.lookup(name)?;
        invoke_sync(function, ctx, args).map_err(|e| fail(name, e))
    }

    /// Calls a method with `receiver` bound to `self`.
    ///
    /// # Errors
    ///
    /// Fails if the receiver's variant has no such method, binding fails, or
    /// the method itself fails.
    pub fn call_method(
        &self,
        ctx: &mut Context,
        receiver: &Value,
        name: &str,
        args: CallArgs,
    ) -> Result<Value> {
        let function = MethodTable::of(receiver)
            .and_then(|table| self.method(table, name))
            .ok_or_else(|| {
                let err = Error::new(ErrorKind::UnknownFunction(format!(
                    "{}.{name}",
                    receiver.value_type()
                )));
                fail(name, err)
            })?;
        invoke_sync(function, ctx, args.with_receiver(receiver.clone())).map_err(|e| fail(name, e))
    }

    fn lookup(&self, name: &str) -> Result<&NativeFn> {
        self.get(name)
            .ok_or_else(|| fail(name, Error::new(ErrorKind::UnknownFunction(name.to_string()))))
    }
}

fn invoke_sync(function: &NativeFn, ctx: &mut Context, args: CallArgs) -> Result<Value> {
    let NativeImpl::Sync(f) = function.func else {
        return Err(Error::new(ErrorKind::WouldSuspend(function.name.to_string())));
    };
    let bound = bind(function.name, function.params, args)?;
    trace!(function = function.name, "calling intrinsic");
    f(ctx, &bound)
}

fn fail(name: &str, err: Error) -> Error {
    debug!(function = name, error = %err, "intrinsic failed");
    err.in_frame(name)
}
