//! Core Entity Trait
//!
//! Every document kept by the store has a unique id assigned on insert.

use task_schema::Task;

/// Core trait for stored documents
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the document's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the document's unique identifier
    fn id(&self) -> &Self::Id;
}

impl Entity for Task {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
