//! Flat key-value persistence surface for collections.
//!
//! # Responsibility
//! - Define the string-keyed get/set/clear contract the record table runs on.
//! - Provide the in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - One key holds one whole collection serialized as JSON text.
//! - A missing key is not an error; readers treat it as an empty collection.
//! - Backends never interpret payload contents.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod migrations;
mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::{open_db, open_db_in_memory, SqliteBackend};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from backend bootstrap and key-value operations.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store backend requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "store backend requires table `{table}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous string-keyed key-value store holding serialized collections.
///
/// The record table is the only writer and serializes every collection as
/// JSON text under its collection name.
pub trait StoreBackend {
    /// Returns the payload stored under `name`, or `None` when absent.
    fn get(&self, name: &str) -> StoreResult<Option<String>>;
    /// Stores `payload` under `name`, replacing any prior value.
    fn set(&mut self, name: &str, payload: &str) -> StoreResult<()>;
    /// Removes every stored collection.
    fn clear(&mut self) -> StoreResult<()>;
}
