//! Suspending functions.
//!
//! These are the only intrinsics that hand control back to the host's
//! scheduler. `wait` races its timer against the context's exit token; the
//! losing future is dropped when the race settles, which deregisters it.

use std::time::Duration;

use tracing::debug;

use glint_foundation::{Value, check_range};

use super::number_arg;
use crate::context::Context;
use crate::registry::SuspendFuture;

/// Schedule: wait
///
/// Suspends for `delay` seconds, or until the host requests exit.
pub(crate) fn native_wait<'a>(ctx: &'a Context, args: &'a [Value]) -> SuspendFuture<'a> {
    Box::pin(async move {
        let delay = number_arg(args, 0)?;
        let limits = ctx.limits();
        check_range(delay, limits.wait_min_secs, limits.wait_max_secs, "delay")?;

        let exit = ctx.exit_token();
        debug!(delay, "wait started");
        tokio::select! {
            () = tokio::time::sleep(Duration::from_secs_f64(delay)) => debug!(delay, "wait finished"),
            () = exit.cancelled() => debug!(delay, "wait cancelled by exit"),
        }
        Ok(Value::Nil)
    })
}

/// Schedule: yield
///
/// Gives the scheduler one turn, then resumes.
pub(crate) fn native_yield<'a>(_ctx: &'a Context, _args: &'a [Value]) -> SuspendFuture<'a> {
    Box::pin(async {
        tokio::task::yield_now().await;
        Ok(Value::Nil)
    })
}
