//! Task Schema
//!
//! The single record type of the to-do list and the contract spoken between
//! the UI and the document store:
//! - task: `Task`, its create variant `NewTask`, and form validation
//! - wire: store errors, live-query snapshots and event names

mod task;
mod wire;

pub use task::{validate_for_create, NewTask, Task, TaskInput, ValidationError};
pub use wire::{
    ErrorCode, Snapshot, StoreError, StoreResult, SubscriptionFailure, COLLECTION, FAILURE_EVENT,
    SNAPSHOT_EVENT,
};
