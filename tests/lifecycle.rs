//! End-to-end lifecycle scenarios against the fake store client.

mod common;

use std::sync::Arc;

use churner::{Config, EventKind, RuntimeError, Supervisor};

use common::{collect_until_finished, FakeStore};

fn config(trials: u32) -> Config {
    let mut cfg = Config::default();
    cfg.trials = trials;
    cfg
}

#[tokio::test]
async fn three_trials_run_the_full_sequence_in_order() {
    let store = FakeStore::new();
    let mut sup = Supervisor::new(config(3), Arc::new(store.clone()), Vec::new());
    let events = sup.bus.subscribe();

    assert!(sup.request_start());
    let started = sup.active_worker().expect("worker tracked after start");

    let finished = sup.join_worker().await.expect("worker completes");
    assert_eq!(finished, started);
    assert_eq!(sup.active_worker(), None, "tracked worker cleared");

    assert_eq!(store.listens(), 3);
    assert_eq!(store.removes(), 3);
    assert_eq!(store.terminates(), 6, "two terminates per trial");

    // Strict per-trial ordering: listen, terminate, remove, terminate.
    let per_trial = ["listen", "terminate", "remove", "terminate"];
    let expected: Vec<String> = (0..3)
        .flat_map(|_| per_trial.iter().map(|s| s.to_string()))
        .collect();
    assert_eq!(store.ops(), expected);

    let events = collect_until_finished(events).await;
    let starting: Vec<u32> = events
        .iter()
        .filter(|e| e.kind == EventKind::TrialStarting)
        .map(|e| e.trial.unwrap())
        .collect();
    assert_eq!(starting, vec![0, 1, 2], "trials start in increasing order");
    let passed = events
        .iter()
        .filter(|e| e.kind == EventKind::TrialPassed)
        .count();
    assert_eq!(passed, 3);
}

#[tokio::test]
async fn zero_trials_still_completes_and_notifies() {
    let store = FakeStore::new();
    let mut sup = Supervisor::new(config(0), Arc::new(store.clone()), Vec::new());

    assert!(sup.request_start());
    sup.join_worker().await.expect("empty run completes");

    assert_eq!(sup.active_worker(), None);
    assert_eq!(store.listens(), 0);
    assert_eq!(store.terminates(), 0);
}

#[tokio::test]
async fn second_start_while_active_is_a_noop() {
    let store = FakeStore::silent();
    let mut sup = Supervisor::new(config(5), Arc::new(store), Vec::new());

    assert!(sup.request_start());
    let first = sup.active_worker();
    assert!(!sup.request_start(), "start while active is a no-op");
    assert_eq!(sup.active_worker(), first, "no second worker spawned");

    sup.shutdown();
    sup.join_worker().await.expect("cancelled worker notifies");
}

#[tokio::test]
async fn cancel_before_first_snapshot_does_not_hang() {
    // Listener never fires; the worker parks in its first wait.
    let store = FakeStore::silent();
    let mut sup = Supervisor::new(config(10), Arc::new(store.clone()), Vec::new());
    let events = sup.bus.subscribe();

    assert!(sup.request_start());
    sup.shutdown();

    let id = sup.join_worker().await.expect("exactly one notification");
    assert_eq!(sup.active_worker(), None);

    // No partial teardown: the listener (if it got registered at all) stays.
    assert_eq!(store.removes(), 0);
    assert_eq!(store.terminates(), 0);

    let events = collect_until_finished(events).await;
    let cancelled: Vec<_> = events
        .iter()
        .filter(|e| e.kind == EventKind::WorkerCancelled)
        .collect();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(
        cancelled[0].trial,
        Some(0),
        "cancellation event names the trial it interrupted"
    );

    // The slot is free again: a new worker may start.
    assert!(sup.request_start());
    assert_ne!(sup.active_worker(), Some(id));
    sup.shutdown();
    sup.join_worker().await.expect("second worker notifies");
}

#[tokio::test]
async fn completion_from_unknown_worker_is_an_invariant_violation() {
    let store = FakeStore::silent();
    let mut sup = Supervisor::new(config(1), Arc::new(store), Vec::new());

    assert!(sup.request_start());
    let tracked = sup.active_worker().unwrap();

    let err = sup.on_worker_complete(tracked + 999).unwrap_err();
    assert!(matches!(err, RuntimeError::WorkerMismatch { .. }));
    assert_eq!(
        sup.active_worker(),
        Some(tracked),
        "mismatch leaves tracking untouched"
    );

    sup.shutdown();
    sup.join_worker().await.expect("worker notifies");
}

#[tokio::test]
async fn failing_terminate_fails_the_trial_but_not_the_worker() {
    let store = FakeStore::with_terminate_error();
    let mut sup = Supervisor::new(config(2), Arc::new(store.clone()), Vec::new());
    let events = sup.bus.subscribe();

    assert!(sup.request_start());
    sup.join_worker().await.expect("worker survives failed trials");

    // Each trial aborts at its first terminate: listener registered, never
    // removed, second terminate never requested.
    assert_eq!(store.listens(), 2);
    assert_eq!(store.terminates(), 2);
    assert_eq!(store.removes(), 0);

    let events = collect_until_finished(events).await;
    let failed = events
        .iter()
        .filter(|e| e.kind == EventKind::TrialFailed)
        .count();
    assert_eq!(failed, 2);
}

#[tokio::test]
async fn listener_error_fails_the_trial_before_any_terminate() {
    let store = FakeStore::with_snapshot_error();
    let mut sup = Supervisor::new(config(2), Arc::new(store.clone()), Vec::new());
    let events = sup.bus.subscribe();

    assert!(sup.request_start());
    sup.join_worker().await.expect("worker survives failed trials");

    assert_eq!(store.listens(), 2);
    assert_eq!(store.terminates(), 0);
    assert_eq!(store.removes(), 0);

    let events = collect_until_finished(events).await;
    let failed = events
        .iter()
        .filter(|e| e.kind == EventKind::TrialFailed)
        .count();
    assert_eq!(failed, 2);
}

#[tokio::test]
async fn bind_is_rejected_unconditionally() {
    let sup = Supervisor::new(config(1), Arc::new(FakeStore::new()), Vec::new());
    assert!(matches!(sup.bind(), Err(RuntimeError::BindUnsupported)));
}
