//! Task Store Service
//!
//! The operations exposed to the UI: open/close a live query, append,
//! update `completed`, delete. Access rules are checked first; every
//! successful mutation re-runs the query and pushes the full result set to
//! all open subscriptions.

use task_schema::{NewTask, StoreError, StoreResult, Task};
use tokio::sync::Mutex;

use crate::entity::Entity;
use crate::live::{LiveQueryHub, SnapshotSink};
use crate::policy::AccessRules;
use crate::repository::TaskRepository;

pub struct TaskStore<R, S> {
    repo: R,
    rules: AccessRules,
    hub: LiveQueryHub<S>,
    /// Held across "query + push" so pushes leave in query order
    sequence: Mutex<()>,
}

impl<R: TaskRepository, S: SnapshotSink> TaskStore<R, S> {
    pub fn new(repo: R, rules: AccessRules, sink: S) -> Self {
        Self {
            repo,
            rules,
            hub: LiveQueryHub::new(sink),
            sequence: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn hub(&self) -> &LiveQueryHub<S> {
        &self.hub
    }

    /// Open a live query for the view `owner`; the current result set is
    /// pushed before returning
    pub async fn subscribe(&self, subscription_id: &str, owner: &str) -> StoreResult<()> {
        self.rules.check_read()?;
        if subscription_id.trim().is_empty() {
            return Err(StoreError::invalid_argument("Subscription id must not be empty"));
        }

        let _sequence = self.sequence.lock().await;
        if !self.hub.register(subscription_id, owner) {
            return Err(StoreError::invalid_argument(format!(
                "Subscription {} is already open",
                subscription_id
            )));
        }

        match self.repo.list().await {
            Ok(tasks) => {
                log::info!("Subscription {} opened with {} tasks", subscription_id, tasks.len());
                self.hub.deliver_to(subscription_id, tasks);
                Ok(())
            }
            Err(e) => {
                self.hub.unregister(subscription_id);
                log::error!("Subscription {} failed: {}", subscription_id, e);
                Err(e)
            }
        }
    }

    /// Close a live query; closing an unknown id is a no-op
    pub fn unsubscribe(&self, subscription_id: &str) -> bool {
        let removed = self.hub.unregister(subscription_id);
        if removed {
            log::info!("Subscription {} closed", subscription_id);
        }
        removed
    }

    /// Close every live query the view `owner` still holds.
    ///
    /// A reloaded page never runs its unmount cleanup, so the host calls
    /// this when a view starts loading or is destroyed.
    pub fn release_view(&self, owner: &str) -> usize {
        let released = self.hub.release_owner(owner);
        if !released.is_empty() {
            log::info!(
                "Released {} subscription(s) left open by `{}`: {}",
                released.len(),
                owner,
                released.join(", ")
            );
        }
        released.len()
    }

    pub async fn create(&self, new_task: NewTask) -> StoreResult<Task> {
        self.rules.check_write()?;
        new_task.validate()?;

        let _sequence = self.sequence.lock().await;
        let task = self.repo.create(&new_task).await?;
        log::info!("Created task {}", task.id());
        self.refresh().await;
        Ok(task)
    }

    /// Overwrite `completed`; the caller decides the new value
    pub async fn set_completed(&self, id: &str, completed: bool) -> StoreResult<()> {
        self.rules.check_write()?;

        let _sequence = self.sequence.lock().await;
        self.repo.set_completed(id, completed).await?;
        log::info!("Task {} completed={}", id, completed);
        self.refresh().await;
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        self.rules.check_write()?;

        let _sequence = self.sequence.lock().await;
        self.repo.delete(&id.to_string()).await?;
        log::info!("Deleted task {}", id);
        self.refresh().await;
        Ok(())
    }

    /// Push the current result set to every subscription
    async fn refresh(&self) {
        if self.hub.subscriber_count() == 0 {
            return;
        }
        match self.repo.list().await {
            Ok(tasks) => self.hub.publish(&tasks),
            Err(e) => {
                log::error!("Live query refresh failed, closing subscriptions: {}", e);
                self.hub.fail_all(&StoreError::unavailable(format!(
                    "Live query could not be refreshed: {}",
                    e.message
                )));
            }
        }
    }
}
