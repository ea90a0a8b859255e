//! SQLite-backed collection store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections with migrations applied.
//! - Map the key-value contract onto one `collections` table.
//!
//! # Invariants
//! - Returned connections have migrations fully applied.
//! - `set` is an upsert; one row per collection name.

use super::migrations::{apply_migrations, current_user_version, latest_version};
use super::{StoreBackend, StoreError, StoreResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and applies all pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    bootstrap(Connection::open(path), "file")
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> StoreResult<Connection> {
    bootstrap(Connection::open_in_memory(), "memory")
}

fn bootstrap(opened: rusqlite::Result<Connection>, mode: &str) -> StoreResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=store status=start mode={mode}");

    let result = opened.map_err(StoreError::from).and_then(|mut conn| {
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => info!(
            "event=db_open module=store status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=store status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }

    result
}

/// Durable store backend over one SQLite `collections` table.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens a database file and wraps it as a ready backend.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens an in-memory database and wraps it as a ready backend.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already-opened connection after verifying schema readiness.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'collections'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(StoreError::MissingRequiredTable("collections"));
    }

    Ok(())
}

impl StoreBackend for SqliteBackend {
    fn get(&self, name: &str) -> StoreResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE name = ?1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn set(&mut self, name: &str, payload: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO collections (name, payload) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![name, payload],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.conn.execute("DELETE FROM collections;", [])?;
        Ok(())
    }
}
