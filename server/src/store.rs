//! Persistence for todo records.
//!
//! # Design
//! `TodoStore` is the only seam between the HTTP layer and the database.
//! Not-found is reported through the typed `StoreError::NotFound` variant so
//! callers never inspect SQLite error codes. `SqliteStore` keeps a single
//! connection behind a mutex; the service layer calls it from
//! `spawn_blocking`.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{Todo, TodoPatch};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS todos (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    title      TEXT    NOT NULL,
    completed  INTEGER NOT NULL DEFAULT 0,
    created_at TEXT    NOT NULL
);";

const RETURNING_COLUMNS: &str = "RETURNING id, title, completed, created_at";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(i64),

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store connection lock poisoned")]
    Poisoned,

    #[error("invalid persisted todo: {0}")]
    InvalidData(String),

    #[error("store task failed: {0}")]
    Task(String),
}

/// CRUD contract the service layer depends on.
pub trait TodoStore: Send + Sync {
    /// All records, newest first.
    fn list(&self) -> StoreResult<Vec<Todo>>;
    fn get(&self, id: i64) -> StoreResult<Todo>;
    /// Inserts a record with `completed = false` and `created_at = now`.
    /// The title must already be trimmed and non-empty.
    fn create(&self, title: &str) -> StoreResult<Todo>;
    /// Applies only the fields present in `patch`.
    fn update(&self, id: i64, patch: &TodoPatch) -> StoreResult<Todo>;
    fn delete(&self, id: i64) -> StoreResult<()>;
}

/// SQLite-backed store holding one connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a database file and ensures the `todos` table.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened todo database");
        Self::bootstrap(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        info!("opened in-memory todo database");
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        f(&conn)
    }
}

impl TodoStore for SqliteStore {
    fn list(&self) -> StoreResult<Vec<Todo>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, completed, created_at FROM todos
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map([], TodoRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            debug!(count = rows.len(), "listed todos");
            rows.into_iter().map(Todo::try_from).collect()
        })
    }

    fn get(&self, id: i64) -> StoreResult<Todo> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, title, completed, created_at FROM todos WHERE id = ?1",
                params![id],
                TodoRow::from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))?
            .try_into()
        })
    }

    fn create(&self, title: &str) -> StoreResult<Todo> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.with_conn(|conn| {
            let row = conn.query_row(
                &format!(
                    "INSERT INTO todos (title, completed, created_at) VALUES (?1, 0, ?2) {RETURNING_COLUMNS}"
                ),
                params![title, created_at],
                TodoRow::from_row,
            )?;
            debug!(id = row.id, "created todo");
            row.try_into()
        })
    }

    fn update(&self, id: i64, patch: &TodoPatch) -> StoreResult<Todo> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!(
                        "UPDATE todos
                         SET title = COALESCE(?1, title), completed = COALESCE(?2, completed)
                         WHERE id = ?3 {RETURNING_COLUMNS}"
                    ),
                    params![patch.title.as_deref(), patch.completed, id],
                    TodoRow::from_row,
                )
                .optional()?
                .ok_or(StoreError::NotFound(id))?;
            debug!(id, "updated todo");
            row.try_into()
        })
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
            if changed == 0 {
                return Err(StoreError::NotFound(id));
            }
            debug!(id, "deleted todo");
            Ok(())
        })
    }
}

/// Raw column values; timestamp parsing happens outside the rusqlite closure.
struct TodoRow {
    id: i64,
    title: String,
    completed: bool,
    created_at: String,
}

impl TodoRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            completed: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl TryFrom<TodoRow> for Todo {
    type Error = StoreError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|err| {
                StoreError::InvalidData(format!(
                    "todo {} has unparseable created_at `{}`: {err}",
                    row.id, row.created_at
                ))
            })?
            .with_timezone(&Utc);
        Ok(Todo {
            id: row.id,
            title: row.title,
            completed: row.completed,
            created_at,
        })
    }
}
