//! Repository and Store Integration Tests
//!
//! Tests for SqliteTaskRepository and TaskStore with in-memory SQLite.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use task_schema::{ErrorCode, NewTask, StoreError, StoreResult, Task};
    use tokio::sync::Mutex;

    use crate::live::testing::RecordingSink;
    use crate::policy::AccessRules;
    use crate::repository::{open_in_memory, Repository, SqliteTaskRepository, TaskRepository};
    use crate::store::TaskStore;

    fn setup_test_repo() -> SqliteTaskRepository {
        let conn = open_in_memory("todos").expect("Failed to init test DB");
        SqliteTaskRepository::new(Arc::new(Mutex::new(conn)), "todos")
    }

    fn setup_store(rules: AccessRules) -> TaskStore<SqliteTaskRepository, RecordingSink> {
        TaskStore::new(setup_test_repo(), rules, RecordingSink::default())
    }

    fn new_task(text: &str, timestamp: i64) -> NewTask {
        NewTask {
            text: text.to_string(),
            completed: false,
            timestamp,
        }
    }

    // ========================
    // Repository
    // ========================

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let repo = setup_test_repo();

        let a = repo.create(&new_task("a", 1)).await.expect("Failed to create");
        let b = repo.create(&new_task("b", 1)).await.expect("Failed to create");

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.text, "a");
        assert!(!a.completed);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first_then_by_id() {
        let repo = setup_test_repo();

        repo.create(&new_task("old", 100)).await.unwrap();
        repo.create(&new_task("new", 300)).await.unwrap();
        let tie_a = repo.create(&new_task("tie", 200)).await.unwrap();
        let tie_b = repo.create(&new_task("tie", 200)).await.unwrap();

        let tasks = repo.list().await.expect("List failed");
        let timestamps: Vec<i64> = tasks.iter().map(|t| t.timestamp).collect();
        assert_eq!(timestamps, vec![300, 200, 200, 100]);

        let mut tie_ids = vec![tie_a.id, tie_b.id];
        tie_ids.sort();
        assert_eq!(tasks[1].id, tie_ids[0]);
        assert_eq!(tasks[2].id, tie_ids[1]);
    }

    #[tokio::test]
    async fn test_set_completed_missing_is_not_found() {
        let repo = setup_test_repo();

        let err = repo.set_completed("nope", true).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let repo = setup_test_repo();
        let created = repo.create(&new_task("x", 1)).await.unwrap();

        repo.delete(&created.id).await.expect("Delete failed");
        repo.delete(&created.id).await.expect("Second delete failed");

        assert!(repo.list().await.unwrap().is_empty());
    }

    // ========================
    // Store
    // ========================

    #[tokio::test]
    async fn test_subscribe_pushes_empty_snapshot() {
        let store = setup_store(AccessRules::open());

        store.subscribe("s1", "main").await.expect("Subscribe failed");

        let snapshot = store.hub().sink().last_snapshot_for("s1").unwrap();
        assert!(snapshot.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_create_round_trip() {
        let store = setup_store(AccessRules::open());
        store.subscribe("s1", "main").await.unwrap();

        store.create(new_task("Buy milk", 1_700_000_000_000)).await.unwrap();

        let snapshot = store.hub().sink().last_snapshot_for("s1").unwrap();
        assert_eq!(snapshot.tasks.len(), 1);
        let task = &snapshot.tasks[0];
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(task.timestamp >= 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_newer_task_is_pushed_first() {
        let store = setup_store(AccessRules::open());
        store.subscribe("s1", "main").await.unwrap();

        store.create(new_task("first", 10)).await.unwrap();
        store.create(new_task("second", 20)).await.unwrap();

        let snapshot = store.hub().sink().last_snapshot_for("s1").unwrap();
        assert_eq!(snapshot.tasks[0].text, "second");
        assert_eq!(snapshot.tasks[1].text, "first");
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_value() {
        let store = setup_store(AccessRules::open());
        store.subscribe("s1", "main").await.unwrap();
        let created = store.create(new_task("toggle me", 1)).await.unwrap();

        store.set_completed(&created.id, !created.completed).await.unwrap();
        let pushed = store.hub().sink().last_snapshot_for("s1").unwrap();
        assert_eq!(pushed.tasks[0].id, created.id);
        assert!(pushed.tasks[0].completed);

        store.set_completed(&created.id, !pushed.tasks[0].completed).await.unwrap();
        let pushed = store.hub().sink().last_snapshot_for("s1").unwrap();
        assert!(!pushed.tasks[0].completed);
    }

    #[tokio::test]
    async fn test_remove_twice_does_not_resurrect() {
        let store = setup_store(AccessRules::open());
        store.subscribe("s1", "main").await.unwrap();
        let created = store.create(new_task("gone", 1)).await.unwrap();

        store.remove(&created.id).await.unwrap();
        store.remove(&created.id).await.unwrap();

        let snapshot = store.hub().sink().last_snapshot_for("s1").unwrap();
        assert!(snapshot.tasks.iter().all(|t| t.id != created.id));
    }

    #[tokio::test]
    async fn test_every_mutation_pushes_newer_version() {
        let store = setup_store(AccessRules::open());
        store.subscribe("s1", "main").await.unwrap();
        store.subscribe("s2", "main").await.unwrap();

        let created = store.create(new_task("a", 1)).await.unwrap();
        store.set_completed(&created.id, true).await.unwrap();
        store.remove(&created.id).await.unwrap();

        for id in ["s1", "s2"] {
            let versions: Vec<u64> = store
                .hub()
                .sink()
                .snapshots()
                .into_iter()
                .filter(|s| s.subscription_id == id)
                .map(|s| s.version)
                .collect();
            assert_eq!(versions.len(), 4, "initial push plus three mutations for {id}");
            assert!(versions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[tokio::test]
    async fn test_denied_read_rejects_subscription() {
        let store = setup_store(AccessRules {
            read: false,
            write: true,
        });

        let err = store.subscribe("s1", "main").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(store.hub().subscriber_count(), 0);
        assert!(store.hub().sink().snapshots().is_empty());
    }

    #[tokio::test]
    async fn test_denied_write_rejects_mutations() {
        let store = setup_store(AccessRules {
            read: true,
            write: false,
        });
        store.subscribe("s1", "main").await.unwrap();

        let err = store.create(new_task("nope", 1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(
            store.remove("x").await.unwrap_err().code,
            ErrorCode::PermissionDenied
        );
        // Only the initial push
        assert_eq!(store.hub().sink().snapshots().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_text_is_invalid_argument() {
        let store = setup_store(AccessRules::open());
        store.subscribe("s1", "main").await.unwrap();

        let err = store.create(new_task("   ", 1)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(store.hub().sink().last_snapshot_for("s1").unwrap().tasks.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_subscription_is_rejected() {
        let store = setup_store(AccessRules::open());
        store.subscribe("s1", "main").await.unwrap();

        let err = store.subscribe("s1", "main").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(store.hub().subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_pushes() {
        let store = setup_store(AccessRules::open());
        store.subscribe("s1", "main").await.unwrap();

        assert!(store.unsubscribe("s1"));
        assert!(!store.unsubscribe("s1"));
        store.create(new_task("after", 1)).await.unwrap();

        assert_eq!(store.hub().sink().snapshots().len(), 1);
    }

    // ========================
    // Refresh failure
    // ========================

    /// Repository whose `list` starts failing after a number of calls
    struct FlakyRepository {
        inner: SqliteTaskRepository,
        lists_left: AtomicUsize,
    }

    #[async_trait]
    impl Repository<Task> for FlakyRepository {
        type Draft = NewTask;

        async fn create(&self, draft: &NewTask) -> StoreResult<Task> {
            self.inner.create(draft).await
        }

        async fn list(&self) -> StoreResult<Vec<Task>> {
            let left = self.lists_left.load(Ordering::SeqCst);
            if left == 0 {
                return Err(StoreError::internal("database is locked"));
            }
            self.lists_left.store(left - 1, Ordering::SeqCst);
            self.inner.list().await
        }

        async fn delete(&self, id: &String) -> StoreResult<()> {
            self.inner.delete(id).await
        }
    }

    #[async_trait]
    impl TaskRepository for FlakyRepository {
        async fn set_completed(&self, id: &str, completed: bool) -> StoreResult<()> {
            self.inner.set_completed(id, completed).await
        }
    }

    #[tokio::test]
    async fn test_refresh_failure_terminates_subscriptions() {
        let repo = FlakyRepository {
            inner: setup_test_repo(),
            lists_left: AtomicUsize::new(1),
        };
        let store = TaskStore::new(repo, AccessRules::open(), RecordingSink::default());
        store.subscribe("s1", "main").await.unwrap();

        // The write itself succeeds; only the follow-up query fails.
        store.create(new_task("kept", 1)).await.expect("Create should succeed");

        let failures = store.hub().sink().failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].subscription_id, "s1");
        assert_eq!(failures[0].error.code, ErrorCode::Unavailable);
        assert_eq!(store.hub().subscriber_count(), 0);
    }

    // ========================
    // View lifecycle
    // ========================

    #[tokio::test]
    async fn test_reloaded_view_releases_stale_subscriptions() {
        let store = setup_store(AccessRules::open());
        // Five page loads that never got to unsubscribe
        for n in 0..5 {
            store.subscribe(&format!("stale-{n}"), "main").await.unwrap();
        }

        assert_eq!(store.release_view("main"), 5);
        assert_eq!(store.hub().subscriber_count(), 0);

        store.subscribe("fresh", "main").await.unwrap();
        let before = store.hub().sink().snapshots().len();
        store.create(new_task("after reload", 1)).await.unwrap();

        let pushed: Vec<_> = store.hub().sink().snapshots().split_off(before);
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].subscription_id, "fresh");
    }

    #[tokio::test]
    async fn test_release_view_keeps_other_views() {
        let store = setup_store(AccessRules::open());
        store.subscribe("s1", "main").await.unwrap();
        store.subscribe("s2", "popout").await.unwrap();

        assert_eq!(store.release_view("main"), 1);
        assert_eq!(store.release_view("main"), 0);
        assert!(store.hub().is_registered("s2"));
        assert!(!store.unsubscribe("s1"));
    }

    // ========================
    // Collection names
    // ========================

    #[tokio::test]
    async fn test_keyword_and_numeric_collection_names_work() {
        for collection in ["order", "123", "select"] {
            let conn = open_in_memory(collection).expect("Migration failed");
            let repo = SqliteTaskRepository::new(Arc::new(Mutex::new(conn)), collection);

            let created = repo.create(&new_task("quoted", 1)).await.unwrap();
            repo.set_completed(&created.id, true).await.unwrap();
            let tasks = repo.list().await.unwrap();
            assert_eq!(tasks.len(), 1, "collection {collection}");
            assert!(tasks[0].completed);

            repo.delete(&created.id).await.unwrap();
            assert!(repo.list().await.unwrap().is_empty());
        }
    }
}
