//! Access Rules
//!
//! Read/write policy enforced by the store independently of the client.

use serde::{Deserialize, Serialize};
use task_schema::{StoreError, StoreResult};

/// Collection-wide access rules (open by default, for development)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRules {
    #[serde(default = "default_true")]
    pub read: bool,
    #[serde(default = "default_true")]
    pub write: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AccessRules {
    fn default() -> Self {
        Self::open()
    }
}

impl AccessRules {
    pub fn open() -> Self {
        Self {
            read: true,
            write: true,
        }
    }

    pub fn locked() -> Self {
        Self {
            read: false,
            write: false,
        }
    }

    pub fn check_read(&self) -> StoreResult<()> {
        if self.read {
            Ok(())
        } else {
            Err(StoreError::permission_denied(
                "Missing or insufficient permissions: the store rules deny read access",
            ))
        }
    }

    pub fn check_write(&self) -> StoreResult<()> {
        if self.write {
            Ok(())
        } else {
            Err(StoreError::permission_denied(
                "Missing or insufficient permissions: the store rules deny write access",
            ))
        }
    }
}
