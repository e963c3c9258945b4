//! Standard-library intrinsics for glint scripts.
//!
//! This crate provides:
//! - [`Intrinsics`] - Global and per-variant function tables with argument binding
//! - [`Context`] - Per-script state: random sources, output, exit signal and [`Limits`]
//! - [`Mulberry32`], [`Xmur3`] and [`SeedRegistry`] - Reproducible seeded random streams
//!
//! The native implementations themselves are private; hosts reach them
//! through [`Intrinsics::call`], [`Intrinsics::call_sync`] and
//! [`Intrinsics::call_method`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
mod native;
pub mod random;
pub mod registry;

pub use context::{BufferHandler, Context, Limits, OutputHandler, StdoutHandler};
pub use random::{Mulberry32, SeedRegistry, Xmur3};
pub use registry::{
    CallArgs, Intrinsics, MethodTable, NativeFn, NativeImpl, Param, ParamDefault, SuspendFn,
    SuspendFuture, SyncFn, bind,
};
