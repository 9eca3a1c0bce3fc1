//! Task Repository
//!
//! SQLite implementation of the to-do collection. Ids are random UUIDs;
//! the list query orders by timestamp descending with the document id as
//! the tie-breaker.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection};
use task_schema::{NewTask, StoreError, StoreResult, Task};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::traits::{Repository, TaskRepository};

/// SQLite implementation of the to-do collection
pub struct SqliteTaskRepository {
    conn: Arc<Mutex<Connection>>,
    table: String,
}

impl SqliteTaskRepository {
    /// `collection` must already be validated (see `StoreConfig::validate`)
    pub fn new(conn: Arc<Mutex<Connection>>, collection: &str) -> Self {
        Self {
            conn,
            table: collection.to_string(),
        }
    }
}

#[async_trait]
impl Repository<Task> for SqliteTaskRepository {
    type Draft = NewTask;

    async fn create(&self, draft: &NewTask) -> StoreResult<Task> {
        let conn = self.conn.lock().await;
        let id = Uuid::new_v4().simple().to_string();

        conn.execute(
            &format!(
                "INSERT INTO \"{}\" (id, text, completed, timestamp) VALUES (?1, ?2, ?3, ?4)",
                self.table
            ),
            params![id, draft.text, draft.completed, draft.timestamp],
        )
        .map_err(|e| StoreError::internal(e.to_string()))?;

        Ok(Task::from_new(id, draft.clone()))
    }

    async fn list(&self) -> StoreResult<Vec<Task>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT id, text, completed, timestamp FROM \"{}\" ORDER BY timestamp DESC, id ASC",
                self.table
            ))
            .map_err(|e| StoreError::internal(e.to_string()))?;

        let rows = stmt
            .query_map([], row_to_task)
            .map_err(|e| StoreError::internal(e.to_string()))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::internal(e.to_string()))
    }

    async fn delete(&self, id: &String) -> StoreResult<()> {
        let conn = self.conn.lock().await;

        conn.execute(&format!("DELETE FROM \"{}\" WHERE id = ?1", self.table), params![id])
            .map_err(|e| StoreError::internal(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn set_completed(&self, id: &str, completed: bool) -> StoreResult<()> {
        let conn = self.conn.lock().await;

        let changed = conn
            .execute(
                &format!("UPDATE \"{}\" SET completed = ?1 WHERE id = ?2", self.table),
                params![completed, id],
            )
            .map_err(|e| StoreError::internal(e.to_string()))?;

        if changed == 0 {
            return Err(StoreError::not_found(format!("No document to update: {}", id)));
        }
        Ok(())
    }
}

/// Convert a database row to Task
fn row_to_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get::<_, i64>(2)? != 0,
        timestamp: row.get(3)?,
    })
}
