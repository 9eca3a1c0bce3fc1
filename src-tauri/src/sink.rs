//! Webview Sink
//!
//! Emits live-query pushes to the frontend. Every window receives every
//! push; the UI keeps the ones addressed to its own subscription id.

use tauri::{AppHandle, Emitter};
use task_schema::{Snapshot, SubscriptionFailure, FAILURE_EVENT, SNAPSHOT_EVENT};
use task_store::{SinkError, SnapshotSink};

pub struct TauriSink {
    app: AppHandle,
}

impl TauriSink {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl SnapshotSink for TauriSink {
    fn send_snapshot(&self, snapshot: &Snapshot) -> Result<(), SinkError> {
        self.app
            .emit(SNAPSHOT_EVENT, snapshot)
            .map_err(|e| SinkError(e.to_string()))
    }

    fn send_failure(&self, failure: &SubscriptionFailure) -> Result<(), SinkError> {
        self.app
            .emit(FAILURE_EVENT, failure)
            .map_err(|e| SinkError(e.to_string()))
    }
}
