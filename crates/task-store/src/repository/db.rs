//! Database Connection and Setup
//!
//! Opens the SQLite file backing a collection and runs migrations.

use std::path::Path;

use rusqlite::Connection;
use task_schema::{StoreError, StoreResult};

/// Open (or create) the database file and make sure the collection exists
pub fn open_collection(db_path: &Path, collection: &str) -> StoreResult<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| StoreError::unavailable(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    let conn = Connection::open(db_path)
        .map_err(|e| StoreError::unavailable(format!("Failed to open {}: {}", db_path.display(), e)))?;

    run_migrations(&conn, collection)?;
    log::info!("Opened collection `{}` at {}", collection, db_path.display());
    Ok(conn)
}

/// In-memory database, used by tests
pub fn open_in_memory(collection: &str) -> StoreResult<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| StoreError::unavailable(format!("Failed to open in-memory db: {}", e)))?;
    run_migrations(&conn, collection)?;
    Ok(conn)
}

/// Run database migrations.
///
/// The collection name is double-quoted in every statement.
fn run_migrations(conn: &Connection, collection: &str) -> StoreResult<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS \"{collection}\" (
            id TEXT PRIMARY KEY NOT NULL,
            text TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            timestamp INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS \"idx_{collection}_timestamp\"
            ON \"{collection}\"(timestamp DESC);"
    ))
    .map_err(|e| StoreError::internal(format!("Migration failed: {}", e)))
}
