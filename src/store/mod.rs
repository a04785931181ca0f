//! # External document-store client surface.
//!
//! The subject under churn is an opaque, callback-style document-store SDK.
//! This module defines the minimal trait surface the harness drives:
//!
//! - [`StoreClient`] — client handle: resolve documents, request termination
//! - [`DocumentRef`] — a document handle that accepts snapshot listeners
//! - [`ListenerRegistration`] — handle returned by `listen`, removable once
//! - [`DocumentSnapshot`], [`StoreError`] — listener payload
//!
//! The client is an injected dependency, not a process-wide global: the
//! supervisor takes an `Arc<dyn StoreClient>`, so tests swap in a fake that
//! records registrations, removals, and terminate calls.

mod client;

pub use client::{
    DocumentRef, DocumentSnapshot, ListenerRegistration, SnapshotCallback, StoreClient,
    StoreError, TerminateCallback,
};
