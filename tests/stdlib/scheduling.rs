//! Integration tests for wait and yield

use std::time::Duration;

use glint_foundation::{ErrorKind, Value};
use glint_stdlib::{CallArgs, Context, Intrinsics};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn wait_defaults_to_one_second() {
    let intrinsics = Intrinsics::standard();
    let mut ctx = Context::new();
    let start = Instant::now();
    let out = intrinsics.call(&mut ctx, "wait", CallArgs::new()).await.unwrap();
    assert!(out.is_nil());
    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn host_exit_cuts_wait_short() {
    let intrinsics = Intrinsics::standard();
    let token = CancellationToken::new();
    let mut ctx = Context::new().with_exit_token(token.clone());

    let canceller = token.clone();
    let local = tokio::task::LocalSet::new();
    let start = Instant::now();
    local
        .run_until(async move {
            tokio::task::spawn_local(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                canceller.cancel();
            });
            intrinsics
                .call(&mut ctx, "wait", CallArgs::new().arg(300))
                .await
                .unwrap();
        })
        .await;
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(5));
    assert!(elapsed < Duration::from_secs(300));
}

#[tokio::test(start_paused = true)]
async fn wait_rejects_delay_out_of_range() {
    let intrinsics = Intrinsics::standard();
    let mut ctx = Context::new();
    let err = intrinsics
        .call(&mut ctx, "wait", CallArgs::new().arg(0))
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IndexOutOfRange { .. }));
    assert_eq!(err.context.unwrap().stack, vec!["wait".to_string()]);
}

#[tokio::test]
async fn yield_returns_nil() {
    let intrinsics = Intrinsics::standard();
    let mut ctx = Context::new();
    let out = intrinsics.call(&mut ctx, "yield", CallArgs::new()).await.unwrap();
    assert_eq!(out, Value::Nil);
}

#[tokio::test]
async fn sync_functions_work_through_async_call() {
    let intrinsics = Intrinsics::standard();
    let mut ctx = Context::new();
    let out = intrinsics
        .call(&mut ctx, "len", CallArgs::new().arg("abc"))
        .await
        .unwrap();
    assert_eq!(out, Value::from(3));
}
