//! Task Record
//!
//! One to-do item as stored in the collection, plus the shape used before the
//! store has assigned an id.

use serde::{Deserialize, Serialize};

/// A stored to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Document id assigned by the store
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Creation time in milliseconds since the epoch, newest first
    pub timestamp: i64,
}

impl Task {
    /// Attach a store-assigned id to a create payload
    pub fn from_new(id: String, new_task: NewTask) -> Self {
        Self {
            id,
            text: new_task.text,
            completed: new_task.completed,
            timestamp: new_task.timestamp,
        }
    }
}

/// A task that has not been written yet (every field except `id`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub timestamp: i64,
}

impl NewTask {
    /// The payload actually sent on create: never completed, stamped at call time
    pub fn stamped(self, now_ms: i64) -> Self {
        Self {
            completed: false,
            timestamp: now_ms,
            ..self
        }
    }

    /// Write-time check applied by the store
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(())
    }
}

/// Raw form input before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub timestamp: Option<i64>,
}

impl TaskInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Error returned when form input cannot become a task
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Text is missing, empty or whitespace-only.
    #[error("Task cannot be empty")]
    Empty,
}

/// Validate form input into a create payload.
///
/// `completed` and `timestamp` fall back to `false` and `0`; the caller is
/// expected to stamp the real creation time before sending.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] when the text is missing or blank.
pub fn validate_for_create(input: &TaskInput) -> Result<NewTask, ValidationError> {
    let text = match input.text.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => return Err(ValidationError::Empty),
    };

    Ok(NewTask {
        text,
        completed: input.completed.unwrap_or(false),
        timestamp: input.timestamp.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_text() {
        for text in ["", " ", "\t\n", "   \r\n  "] {
            assert_eq!(
                validate_for_create(&TaskInput::from_text(text)),
                Err(ValidationError::Empty),
                "input {text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_missing_text() {
        assert_eq!(validate_for_create(&TaskInput::default()), Err(ValidationError::Empty));
    }

    #[test]
    fn test_defaults_for_create() {
        let new_task = validate_for_create(&TaskInput::from_text("Buy milk")).unwrap();
        assert_eq!(new_task.text, "Buy milk");
        assert!(!new_task.completed);
        assert_eq!(new_task.timestamp, 0);
    }

    #[test]
    fn test_keeps_text_as_entered() {
        let new_task = validate_for_create(&TaskInput::from_text("  walk dog ")).unwrap();
        assert_eq!(new_task.text, "  walk dog ");
    }

    #[test]
    fn test_stamped_resets_completion() {
        let input = TaskInput {
            text: Some("Call mom".to_string()),
            completed: Some(true),
            timestamp: Some(5),
        };
        let stamped = validate_for_create(&input).unwrap().stamped(1_700_000_000_000);
        assert!(!stamped.completed);
        assert_eq!(stamped.timestamp, 1_700_000_000_000);
        assert_eq!(stamped.text, "Call mom");
    }

    #[test]
    fn test_validation_message() {
        assert_eq!(ValidationError::Empty.to_string(), "Task cannot be empty");
    }

    #[test]
    fn test_new_task_deserializes_with_defaults() {
        let new_task: NewTask = serde_json::from_str(r#"{"text":"x"}"#).unwrap();
        assert!(!new_task.completed);
        assert_eq!(new_task.timestamp, 0);
        assert!(new_task.validate().is_ok());
    }
}
