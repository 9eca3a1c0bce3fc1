//! UI Error Taxonomy
//!
//! Subscription errors end the live query and block the view; mutation
//! errors only produce a transient notification.

use std::fmt;

use task_schema::StoreError;

/// Terminal error of the live query
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionError {
    /// The store's access rules rejected the query
    #[error("access denied: {0}")]
    Permission(String),
    /// Any other failure to open or keep the query
    #[error("connection error: {0}")]
    Connection(String),
}

impl From<StoreError> for SubscriptionError {
    fn from(err: StoreError) -> Self {
        if err.is_permission_denied() {
            SubscriptionError::Permission(err.message)
        } else {
            SubscriptionError::Connection(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Toggle,
    Delete,
}

impl MutationKind {
    pub fn success_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "Task added successfully!",
            MutationKind::Toggle => "Task updated successfully!",
            MutationKind::Delete => "Task deleted successfully!",
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "Failed to add task. Please try again.",
            MutationKind::Toggle => "Failed to update task.",
            MutationKind::Delete => "Failed to delete task.",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MutationKind::Create => "create",
            MutationKind::Toggle => "toggle",
            MutationKind::Delete => "delete",
        })
    }
}

/// A create/toggle/delete call that did not take effect
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} failed: {cause}")]
pub struct MutationError {
    pub kind: MutationKind,
    #[source]
    pub cause: StoreError,
}

impl MutationError {
    pub fn new(kind: MutationKind, cause: StoreError) -> Self {
        Self { kind, cause }
    }
}
