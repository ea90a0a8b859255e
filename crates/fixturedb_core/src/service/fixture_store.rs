//! Fixture store facade and per-collection handle.
//!
//! # Responsibility
//! - Compose the record table and relation graph behind one entry point.
//! - Bind a collection name once so callers never repeat it.
//!
//! # Invariants
//! - The relation graph lives and dies with the store instance.
//! - All operations are synchronous read-modify-write without locking;
//!   concurrent callers on one store are out of contract.

use crate::model::record::{Filter, Record};
use crate::relation::graph::{BelongsTo, RelationGraph};
use crate::relation::include::IncludeSpec;
use crate::relation::resolver::AssociationResolver;
use crate::repo::record_table::{RecordTable, RepoError, RepoResult};
use crate::store::{MemoryBackend, StoreBackend};
use log::info;

/// Read options for `find_all`/`find_one`.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Include specification tree to expand on each result record.
    pub include: Vec<IncludeSpec>,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options carrying the given include specs.
    pub fn with_include(include: Vec<IncludeSpec>) -> Self {
        Self { include }
    }
}

/// In-process fixture data store over one persistence backend.
pub struct FixtureStore<B: StoreBackend> {
    table: RecordTable<B>,
    graph: RelationGraph,
}

impl FixtureStore<MemoryBackend> {
    /// Creates a store over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: StoreBackend> FixtureStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            table: RecordTable::new(backend),
            graph: RelationGraph::new(),
        }
    }

    /// Returns a handle bound to one collection name.
    pub fn collection(&mut self, name: impl Into<String>) -> Collection<'_, B> {
        Collection {
            store: self,
            name: name.into(),
        }
    }

    /// Registers `belongsTo` declarations for one child collection,
    /// replacing any prior registration for that child.
    pub fn belongs_to(&mut self, child: &str, declarations: Vec<BelongsTo>) {
        self.graph.belongs_to(child, declarations);
    }

    /// Creates one record with a freshly assigned id.
    pub fn create(&mut self, name: &str, data: Record) -> RepoResult<Record> {
        self.table.create(name, data)
    }

    /// Creates one record from a JSON object payload.
    pub fn create_json(&mut self, name: &str, payload: &str) -> RepoResult<Record> {
        let data = Record::from_json(payload).map_err(|err| {
            RepoError::InvalidData(format!("create payload is not a JSON object: {err}"))
        })?;
        self.create(name, data)
    }

    /// Replaces the first matching record wholesale. `false` on no match.
    pub fn update(&mut self, name: &str, filter: &Filter, record: Record) -> RepoResult<bool> {
        self.table.update(name, filter, record)
    }

    /// Removes the first matching record. Always reports success.
    pub fn remove(&mut self, name: &str, filter: &Filter) -> RepoResult<bool> {
        self.table.remove(name, filter)
    }

    /// Returns every matching record with includes expanded.
    pub fn find_all(
        &self,
        name: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> RepoResult<Vec<Record>> {
        self.resolver().find_all(name, filter, &options.include)
    }

    /// Returns the first matching record with includes expanded, or `None`.
    pub fn find_one(
        &self,
        name: &str,
        filter: &Filter,
        options: &FindOptions,
    ) -> RepoResult<Option<Record>> {
        self.resolver().find_one(name, filter, &options.include)
    }

    /// Wipes every persisted collection. Relation declarations survive.
    pub fn clear(&mut self) -> RepoResult<()> {
        info!("event=store_clear module=service status=ok");
        self.table.clear()
    }

    fn resolver(&self) -> AssociationResolver<'_, B> {
        AssociationResolver::new(&self.table, &self.graph)
    }
}

/// Handle binding one collection name to the store surface.
pub struct Collection<'s, B: StoreBackend> {
    store: &'s mut FixtureStore<B>,
    name: String,
}

impl<B: StoreBackend> Collection<'_, B> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn belongs_to(&mut self, declarations: Vec<BelongsTo>) {
        self.store.belongs_to(&self.name, declarations);
    }

    pub fn create(&mut self, data: Record) -> RepoResult<Record> {
        self.store.create(&self.name, data)
    }

    pub fn create_json(&mut self, payload: &str) -> RepoResult<Record> {
        self.store.create_json(&self.name, payload)
    }

    pub fn update(&mut self, filter: &Filter, record: Record) -> RepoResult<bool> {
        self.store.update(&self.name, filter, record)
    }

    pub fn remove(&mut self, filter: &Filter) -> RepoResult<bool> {
        self.store.remove(&self.name, filter)
    }

    pub fn find_all(&self, filter: &Filter, options: &FindOptions) -> RepoResult<Vec<Record>> {
        self.store.find_all(&self.name, filter, options)
    }

    pub fn find_one(&self, filter: &Filter, options: &FindOptions) -> RepoResult<Option<Record>> {
        self.store.find_one(&self.name, filter, options)
    }
}
