//! List View State
//!
//! `Loading` until the first push, then `Ready` with the latest snapshot.
//! An error moves to `Failed`, which lasts until the view is remounted.

use std::fmt;

use task_schema::Task;

use crate::errors::SubscriptionError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    Loading,
    Ready(Vec<Task>),
    Failed(SubscriptionError),
}

impl ListState {
    /// Replace the list with a pushed snapshot (ignored once failed)
    pub fn apply_snapshot(&mut self, mut tasks: Vec<Task>) {
        if self.is_failed() {
            return;
        }
        // Stable: equal timestamps keep the store's order.
        tasks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        *self = ListState::Ready(tasks);
    }

    /// Enter the terminal error state; the first error is kept
    pub fn apply_error(&mut self, error: SubscriptionError) {
        if !self.is_failed() {
            *self = ListState::Failed(error);
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ListState::Failed(_))
    }

    /// Ready, but the collection is empty
    pub fn is_ready_empty(&self) -> bool {
        matches!(self, ListState::Ready(tasks) if tasks.is_empty())
    }

    /// Tasks to display; empty unless ready
    pub fn tasks(&self) -> &[Task] {
        match self {
            ListState::Ready(tasks) => tasks,
            _ => &[],
        }
    }

    pub fn counter(&self) -> Option<TaskCounter> {
        let tasks = self.tasks();
        if tasks.is_empty() {
            return None;
        }
        Some(TaskCounter {
            remaining: tasks.iter().filter(|t| !t.completed).count(),
            total: tasks.len(),
        })
    }

    pub fn banner(&self) -> Option<Banner> {
        match self {
            ListState::Failed(error) => Some(Banner::for_error(error)),
            _ => None,
        }
    }

    /// Form input and submit are disabled while failed or submitting
    pub fn form_disabled(&self, submitting: bool) -> bool {
        submitting || self.is_failed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounter {
    pub remaining: usize,
    pub total: usize,
}

impl fmt::Display for TaskCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} tasks remaining", self.remaining, self.total)
    }
}

/// Persistent, blocking error banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub title: &'static str,
    pub message: &'static str,
}

impl Banner {
    pub fn for_error(error: &SubscriptionError) -> Self {
        match error {
            SubscriptionError::Permission(_) => Banner {
                title: "Database Setup Required",
                message: "The task store denied access to the todos collection. For development, \
                          open store.json in the app config directory, set \"read\": true and \
                          \"write\": true under \"rules\", then restart the app.",
            },
            SubscriptionError::Connection(_) => Banner {
                title: "Connection Error",
                message: "Failed to connect to the task store. Please check that the app backend \
                          is running and its store configuration is valid.",
            },
        }
    }
}
