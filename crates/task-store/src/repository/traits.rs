//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for collection access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use task_schema::{NewTask, StoreResult, Task};

use crate::entity::Entity;

/// Core repository trait for document CRUD
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Payload accepted on insert (the entity without its id)
    type Draft: Send + Sync;

    /// Append a new document, assigning its id
    async fn create(&self, draft: &Self::Draft) -> StoreResult<T>;

    /// List all documents in query order
    async fn list(&self) -> StoreResult<Vec<T>>;

    /// Delete a document by id; deleting a missing id is not an error
    async fn delete(&self, id: &T::Id) -> StoreResult<()>;
}

/// Field-level updates for the to-do collection
#[async_trait]
pub trait TaskRepository: Repository<Task, Draft = NewTask> {
    /// Overwrite `completed` on an existing document
    async fn set_completed(&self, id: &str, completed: bool) -> StoreResult<()>;
}
