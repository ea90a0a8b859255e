//! Generic record table: CRUD over one named collection.
//!
//! # Responsibility
//! - Own id generation, linear filter matching and create/update/remove.
//! - Round-trip collections as JSON text through the injected backend.
//!
//! # Invariants
//! - Ids are assigned as `max(existing ids, 0) + 1` and never reused after
//!   removals within the same collection state.
//! - `update` replaces the whole record at the matched index, never merges.
//! - `remove` drops the first match only and reports success either way.
//! - A missing collection reads as empty and is initialized on first write.

use crate::model::record::{Filter, Record};
use crate::store::{StoreBackend, StoreError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Transport-level errors for record persistence.
///
/// Unmatched filters and absent collections are not represented here; those
/// degrade to `false`/`None`/empty results by contract.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted collection data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Returns the next free id for a collection: one past the current maximum.
///
/// Records without a positive integer id count as id 0, so an empty
/// collection yields 1. Derived from current state, not a stored counter,
/// which keeps ids monotonic across removals.
pub fn generate_id(items: &[Record]) -> u64 {
    items.iter().filter_map(Record::id).max().unwrap_or(0) + 1
}

/// Returns the index of the first record matching every filter term.
///
/// The empty filter matches the first record; an empty collection yields
/// `None`.
pub fn find_index(filter: &Filter, items: &[Record]) -> Option<usize> {
    items.iter().position(|item| filter.matches(item))
}

/// CRUD repository over named collections stored in one backend.
pub struct RecordTable<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> RecordTable<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads one collection; a missing key reads as empty.
    pub fn load(&self, name: &str) -> RepoResult<Vec<Record>> {
        match self.backend.get(name)? {
            Some(payload) => serde_json::from_str(&payload).map_err(|err| {
                RepoError::InvalidData(format!("collection `{name}` is not a record array: {err}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Persists one collection, replacing the prior payload.
    pub fn save(&mut self, name: &str, items: &[Record]) -> RepoResult<()> {
        let payload = serde_json::to_string(items).map_err(|err| {
            RepoError::InvalidData(format!("collection `{name}` failed to serialize: {err}"))
        })?;
        self.backend.set(name, &payload)?;
        Ok(())
    }

    /// Appends a new record with a freshly generated id and persists.
    ///
    /// Any caller-supplied `id` field is overwritten.
    pub fn create(&mut self, name: &str, data: Record) -> RepoResult<Record> {
        let mut items = self.load(name)?;

        let mut record = data;
        record.set_id(generate_id(&items));

        items.push(record.clone());
        self.save(name, &items)?;

        debug!(
            "event=record_create module=repo collection={name} id={} count={}",
            record.id().unwrap_or(0),
            items.len()
        );
        Ok(record)
    }

    /// Replaces the first matching record wholesale and persists.
    ///
    /// Returns `false` without writing when nothing matches.
    pub fn update(&mut self, name: &str, filter: &Filter, record: Record) -> RepoResult<bool> {
        let mut items = self.load(name)?;

        let Some(index) = find_index(filter, &items) else {
            debug!("event=record_update module=repo collection={name} matched=false");
            return Ok(false);
        };

        items[index] = record;
        self.save(name, &items)?;

        debug!("event=record_update module=repo collection={name} matched=true index={index}");
        Ok(true)
    }

    /// Removes the first matching record and persists.
    ///
    /// Reports success whether or not anything was removed; callers cannot
    /// distinguish "nothing matched" from "nothing existed".
    pub fn remove(&mut self, name: &str, filter: &Filter) -> RepoResult<bool> {
        let mut items = self.load(name)?;

        if let Some(index) = find_index(filter, &items) {
            items.remove(index);
            self.save(name, &items)?;
            debug!("event=record_remove module=repo collection={name} removed=true index={index}");
        } else {
            debug!("event=record_remove module=repo collection={name} removed=false");
        }

        Ok(true)
    }

    /// Returns every record matching the filter, in insertion order.
    pub fn find_all(&self, name: &str, filter: &Filter) -> RepoResult<Vec<Record>> {
        let items = self.load(name)?;
        Ok(items.into_iter().filter(|item| filter.matches(item)).collect())
    }

    /// Returns the first matching record, or `None`.
    pub fn find_one(&self, name: &str, filter: &Filter) -> RepoResult<Option<Record>> {
        let mut items = self.load(name)?;
        Ok(find_index(filter, &items).map(|index| items.swap_remove(index)))
    }

    /// Wipes every persisted collection.
    pub fn clear(&mut self) -> RepoResult<()> {
        self.backend.clear()?;
        Ok(())
    }
}
