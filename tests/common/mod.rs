//! Shared test fixtures: an in-memory fake store client that records every
//! registration, removal, and terminate call in order.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time;

use churner::{
    DocumentRef, DocumentSnapshot, Event, EventKind, ListenerRegistration, SnapshotCallback,
    StoreClient, StoreError, TerminateCallback,
};

/// Fake document-store client.
///
/// By default every registered listener receives one snapshot shortly after
/// registration and terminate completes asynchronously after a short delay.
/// Builders flip in failure modes or silence the listener entirely.
#[derive(Clone)]
pub struct FakeStore {
    inner: Arc<Inner>,
}

struct Inner {
    ops: Mutex<Vec<String>>,
    listens: AtomicU32,
    removes: AtomicU32,
    terminates: AtomicU32,
    signal_snapshots: bool,
    snapshot_error: bool,
    terminate_error: bool,
    delay: Duration,
}

impl FakeStore {
    /// A store that behaves: one snapshot per registration, terminate Ok.
    pub fn new() -> Self {
        Self::build(true, false, false)
    }

    /// A store whose listeners never fire (for cancellation scenarios).
    pub fn silent() -> Self {
        Self::build(false, false, false)
    }

    /// A store whose listeners deliver a stream error instead of a snapshot.
    pub fn with_snapshot_error() -> Self {
        Self::build(false, true, false)
    }

    /// A store that signals snapshots but fails every terminate request.
    pub fn with_terminate_error() -> Self {
        Self::build(true, false, true)
    }

    fn build(signal_snapshots: bool, snapshot_error: bool, terminate_error: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                ops: Mutex::new(Vec::new()),
                listens: AtomicU32::new(0),
                removes: AtomicU32::new(0),
                terminates: AtomicU32::new(0),
                signal_snapshots,
                snapshot_error,
                terminate_error,
                delay: Duration::from_millis(2),
            }),
        }
    }

    pub fn ops(&self) -> Vec<String> {
        self.inner.ops.lock().unwrap().clone()
    }

    pub fn listens(&self) -> u32 {
        self.inner.listens.load(Ordering::SeqCst)
    }

    pub fn removes(&self) -> u32 {
        self.inner.removes.load(Ordering::SeqCst)
    }

    pub fn terminates(&self) -> u32 {
        self.inner.terminates.load(Ordering::SeqCst)
    }
}

impl Inner {
    fn record(&self, op: &str) {
        self.ops.lock().unwrap().push(op.to_string());
    }
}

impl StoreClient for FakeStore {
    fn document(&self, path: &str) -> Result<Box<dyn DocumentRef>, StoreError> {
        if path.is_empty() {
            return Err(StoreError::InvalidPath { path: path.into() });
        }
        Ok(Box::new(FakeDoc {
            path: path.into(),
            inner: Arc::clone(&self.inner),
        }))
    }

    fn terminate(&self, on_complete: TerminateCallback) {
        self.inner.record("terminate");
        self.inner.terminates.fetch_add(1, Ordering::SeqCst);
        let fail = self.inner.terminate_error;
        let delay = self.inner.delay;
        tokio::spawn(async move {
            time::sleep(delay).await;
            if fail {
                on_complete(Err(StoreError::Terminate {
                    reason: "fake terminate failure".into(),
                }));
            } else {
                on_complete(Ok(()));
            }
        });
    }
}

struct FakeDoc {
    path: Arc<str>,
    inner: Arc<Inner>,
}

impl DocumentRef for FakeDoc {
    fn path(&self) -> &str {
        &self.path
    }

    fn listen(&self, on_event: SnapshotCallback) -> Box<dyn ListenerRegistration> {
        self.inner.record("listen");
        self.inner.listens.fetch_add(1, Ordering::SeqCst);

        if self.inner.signal_snapshots || self.inner.snapshot_error {
            let path = Arc::clone(&self.path);
            let fail = self.inner.snapshot_error;
            let delay = self.inner.delay;
            tokio::spawn(async move {
                time::sleep(delay).await;
                if fail {
                    on_event(Err(StoreError::Listen {
                        reason: "fake stream failure".into(),
                    }));
                } else {
                    on_event(Ok(DocumentSnapshot { path, exists: true }));
                }
            });
        }

        Box::new(FakeRegistration {
            inner: Arc::clone(&self.inner),
            removed: AtomicBool::new(false),
        })
    }
}

struct FakeRegistration {
    inner: Arc<Inner>,
    removed: AtomicBool,
}

impl ListenerRegistration for FakeRegistration {
    fn remove(&self) {
        if !self.removed.swap(true, Ordering::SeqCst) {
            self.inner.record("remove");
            self.inner.removes.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Drains bus events until the first `WorkerFinished` (with a safety timeout).
pub async fn collect_until_finished(
    mut rx: tokio::sync::broadcast::Receiver<Event>,
) -> Vec<Event> {
    let mut events = Vec::new();
    let deadline = Duration::from_secs(5);
    let collect = async {
        while let Ok(ev) = rx.recv().await {
            let kind = ev.kind;
            events.push(ev);
            if kind == EventKind::WorkerFinished {
                break;
            }
        }
    };
    time::timeout(deadline, collect)
        .await
        .expect("worker never published WorkerFinished");
    events
}
