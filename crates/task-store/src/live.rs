//! Live Queries
//!
//! Tracks open subscriptions and pushes the whole ordered result set to
//! them. Every push carries a version number that only ever increases, so a
//! client can drop pushes that arrive out of order.
//!
//! Each subscription remembers which view opened it, so everything a view
//! left open can be released when that view reloads or goes away.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use task_schema::{Snapshot, StoreError, SubscriptionFailure, Task};

/// Error raised by a sink when a push could not be handed to the client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to deliver push: {0}")]
pub struct SinkError(pub String);

/// Where pushes go (the webview, a test recorder, ...)
pub trait SnapshotSink: Send + Sync {
    fn send_snapshot(&self, snapshot: &Snapshot) -> Result<(), SinkError>;

    fn send_failure(&self, failure: &SubscriptionFailure) -> Result<(), SinkError>;
}

pub struct LiveQueryHub<S> {
    sink: S,
    /// subscription id -> owning view
    subscriptions: Mutex<BTreeMap<String, String>>,
    version: AtomicU64,
}

impl<S: SnapshotSink> LiveQueryHub<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            subscriptions: Mutex::new(BTreeMap::new()),
            version: AtomicU64::new(0),
        }
    }

    #[cfg(test)]
    pub(crate) fn sink(&self) -> &S {
        &self.sink
    }

    fn subscriptions(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.subscriptions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns false if the id is already registered
    pub fn register(&self, subscription_id: &str, owner: &str) -> bool {
        let mut subscriptions = self.subscriptions();
        if subscriptions.contains_key(subscription_id) {
            return false;
        }
        subscriptions.insert(subscription_id.to_string(), owner.to_string());
        true
    }

    /// Returns false if the id was not registered
    pub fn unregister(&self, subscription_id: &str) -> bool {
        self.subscriptions().remove(subscription_id).is_some()
    }

    /// Drop every subscription opened by `owner`; returns the released ids
    pub fn release_owner(&self, owner: &str) -> Vec<String> {
        let mut subscriptions = self.subscriptions();
        let released: Vec<String> = subscriptions
            .iter()
            .filter(|(_, opened_by)| opened_by.as_str() == owner)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &released {
            subscriptions.remove(id);
        }
        released
    }

    pub fn is_registered(&self, subscription_id: &str) -> bool {
        self.subscriptions().contains_key(subscription_id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions().len()
    }

    fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Push a result set to a single subscription
    pub fn deliver_to(&self, subscription_id: &str, tasks: Vec<Task>) {
        if !self.is_registered(subscription_id) {
            return;
        }
        let snapshot = Snapshot {
            subscription_id: subscription_id.to_string(),
            version: self.next_version(),
            tasks,
        };
        if let Err(e) = self.sink.send_snapshot(&snapshot) {
            log::warn!("Snapshot for {} dropped: {}", subscription_id, e);
        }
    }

    /// Push a result set to every subscription
    pub fn publish(&self, tasks: &[Task]) {
        let ids: Vec<String> = self.subscriptions().keys().cloned().collect();
        for subscription_id in ids {
            let snapshot = Snapshot {
                subscription_id,
                version: self.next_version(),
                tasks: tasks.to_vec(),
            };
            if let Err(e) = self.sink.send_snapshot(&snapshot) {
                log::warn!("Snapshot for {} dropped: {}", snapshot.subscription_id, e);
            }
        }
    }

    /// Terminate every subscription with `error`
    pub fn fail_all(&self, error: &StoreError) {
        let ids: Vec<String> = std::mem::take(&mut *self.subscriptions()).into_keys().collect();
        for subscription_id in ids {
            let failure = SubscriptionFailure {
                subscription_id,
                error: error.clone(),
            };
            if let Err(e) = self.sink.send_failure(&failure) {
                log::warn!("Failure for {} dropped: {}", failure.subscription_id, e);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Sink that records every push
    #[derive(Default)]
    pub struct RecordingSink {
        pub snapshots: Mutex<Vec<Snapshot>>,
        pub failures: Mutex<Vec<SubscriptionFailure>>,
    }

    impl RecordingSink {
        pub fn snapshots(&self) -> Vec<Snapshot> {
            self.snapshots.lock().unwrap().clone()
        }

        pub fn failures(&self) -> Vec<SubscriptionFailure> {
            self.failures.lock().unwrap().clone()
        }

        pub fn last_snapshot_for(&self, subscription_id: &str) -> Option<Snapshot> {
            self.snapshots()
                .into_iter()
                .rev()
                .find(|s| s.subscription_id == subscription_id)
        }
    }

    impl SnapshotSink for RecordingSink {
        fn send_snapshot(&self, snapshot: &Snapshot) -> Result<(), SinkError> {
            self.snapshots.lock().unwrap().push(snapshot.clone());
            Ok(())
        }

        fn send_failure(&self, failure: &SubscriptionFailure) -> Result<(), SinkError> {
            self.failures.lock().unwrap().push(failure.clone());
            Ok(())
        }
    }
}
