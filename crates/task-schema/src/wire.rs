//! Store Wire Contract
//!
//! Payloads exchanged between the UI and the document store: errors returned
//! from commands, and the live-query pushes delivered as events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Name of the collection holding to-do documents
pub const COLLECTION: &str = "todos";

/// Event carrying a [`Snapshot`]
pub const SNAPSHOT_EVENT: &str = "tasks:snapshot";

/// Event carrying a [`SubscriptionFailure`]
pub const FAILURE_EVENT: &str = "tasks:failure";

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error classes reported by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    /// Rejected by the store's access rules
    PermissionDenied,
    NotFound,
    InvalidArgument,
    /// Store unreachable or not ready
    Unavailable,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::PermissionDenied => "permission-denied",
            ErrorCode::NotFound => "not-found",
            ErrorCode::InvalidArgument => "invalid-argument",
            ErrorCode::Unavailable => "unavailable",
            ErrorCode::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by every store operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct StoreError {
    pub code: ErrorCode,
    pub message: String,
}

impl StoreError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unavailable, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    pub fn is_permission_denied(&self) -> bool {
        self.code == ErrorCode::PermissionDenied
    }
}

impl From<crate::task::ValidationError> for StoreError {
    fn from(err: crate::task::ValidationError) -> Self {
        StoreError::invalid_argument(err.to_string())
    }
}

/// One push of a live query: the entire current result set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub subscription_id: String,
    /// Strictly increasing across all pushes from one store
    pub version: u64,
    /// Ordered by timestamp, newest first
    pub tasks: Vec<Task>,
}

/// Terminal error pushed to a subscription; no further snapshots follow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionFailure {
    pub subscription_id: String,
    pub error: StoreError,
}
