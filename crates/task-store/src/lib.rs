//! Task Store
//!
//! Live document store for the to-do collection.
//!
//! Layered like the desktop host that embeds it:
//! - entity / repository: SQLite-backed collection access
//! - policy: read/write access rules
//! - live: live-query subscriptions and snapshot pushes
//! - store: the service the IPC commands call into

mod config;
mod entity;
mod live;
mod policy;
mod repository;
mod store;

pub use config::{ConfigError, StoreConfig, CONFIG_FILE};
pub use entity::Entity;
pub use live::{LiveQueryHub, SinkError, SnapshotSink};
pub use policy::AccessRules;
pub use repository::{open_collection, open_in_memory, Repository, SqliteTaskRepository, TaskRepository};
pub use store::TaskStore;

pub use task_schema::{ErrorCode, NewTask, Snapshot, StoreError, StoreResult, SubscriptionFailure, Task};
