//! Repository Layer
//!
//! Data access abstractions and the SQLite implementation.

mod db;
mod task_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use db::{open_collection, open_in_memory};
pub use task_repo::SqliteTaskRepository;
pub use traits::{Repository, TaskRepository};
