use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::{Result, TizumError};
use crate::model::Task;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    created_at TEXT NOT NULL,
    done INTEGER NOT NULL
);";

/// Parse an RFC 3339 `created_at` column. Unparseable values are reported,
/// never replaced with a guessed date.
fn parse_created_at(id: i64, value: String) -> Result<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(&value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(source) => Err(TizumError::DataCorruption { id, value, source }),
    }
}

/// Single-table SQLite storage for tasks.
pub struct TaskStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl TaskStore {
    /// Open (or create) the database file at `path` and ensure the schema.
    pub fn open(path: &Path) -> Result<Self> {
        let unavailable = |source| TizumError::StorageUnavailable {
            path: path.display().to_string(),
            source,
        };
        let conn = Connection::open(path).map_err(unavailable)?;
        conn.execute_batch("PRAGMA busy_timeout=5000;")
            .map_err(unavailable)?;
        conn.execute_batch(SCHEMA).map_err(unavailable)?;
        debug!(path = %path.display(), "opened task database");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        let unavailable = |source| TizumError::StorageUnavailable {
            path: ":memory:".to_string(),
            source,
        };
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        conn.execute_batch(SCHEMA).map_err(unavailable)?;
        Ok(Self { conn, path: None })
    }

    /// File the store was opened from; `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Expose the raw connection (for tests).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Insert a pending task stamped with the current time. Returns its id.
    pub fn insert(&self, text: &str) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO tasks (text, created_at, done) VALUES (?1, ?2, 0)",
                params![text, now],
            )
            .map_err(TizumError::StorageWrite)?;
        let id = self.conn.last_insert_rowid();
        debug!(id, "inserted task");
        Ok(id)
    }

    /// All tasks, ascending by id.
    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text, created_at, done FROM tasks ORDER BY id ASC")
            .map_err(TizumError::StorageRead)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })
            .map_err(TizumError::StorageRead)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(TizumError::StorageRead)?;

        rows.into_iter()
            .map(|(id, text, created_at, done)| -> Result<Task> {
                Ok(Task {
                    id,
                    text,
                    created_at: parse_created_at(id, created_at)?,
                    done: done != 0,
                })
            })
            .collect()
    }

    /// Replace a task's text. Returns the number of rows changed (0 when `id`
    /// does not exist).
    pub fn update_text(&self, id: i64, text: &str) -> Result<usize> {
        let changed = self
            .conn
            .execute(
                "UPDATE tasks SET text = ?1 WHERE id = ?2",
                params![text, id],
            )
            .map_err(TizumError::StorageWrite)?;
        debug!(id, changed, "updated task text");
        Ok(changed)
    }

    pub fn set_done(&self, id: i64, done: bool) -> Result<usize> {
        let changed = self
            .conn
            .execute(
                "UPDATE tasks SET done = ?1 WHERE id = ?2",
                params![i64::from(done), id],
            )
            .map_err(TizumError::StorageWrite)?;
        debug!(id, done, changed, "updated task done flag");
        Ok(changed)
    }

    pub fn delete(&self, id: i64) -> Result<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])
            .map_err(TizumError::StorageWrite)?;
        debug!(id, changed, "deleted task");
        Ok(changed)
    }

    /// Number of stored tasks. Doubles as a connectivity check.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
            .map_err(TizumError::StorageRead)?;
        Ok(count as usize)
    }
}
