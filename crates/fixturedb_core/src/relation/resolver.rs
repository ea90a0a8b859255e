//! Eager association resolution against the record table.
//!
//! # Responsibility
//! - Expand include specifications into nested child records attached onto
//!   each result record.
//! - Build foreign-key filters from registered declarations.
//!
//! # Invariants
//! - One call filters by relation exactly one level deep; nested deps recurse
//!   through a fresh `find_all` per level.
//! - A child with no declaration naming the parent is fetched with the empty
//!   filter, attaching ALL of its records. Fixture suites rely on this
//!   fallback; do not tighten it.
//! - Absent collections, relations and ids degrade to empty results, never
//!   errors.

use crate::model::record::{Filter, Record};
use crate::relation::graph::RelationGraph;
use crate::relation::include::{parse_associations, Association, IncludeSpec};
use crate::repo::record_table::{RecordTable, RepoResult};
use crate::store::StoreBackend;
use log::trace;
use serde_json::Value;

/// Read-side resolver joining child collections onto parent records.
pub struct AssociationResolver<'a, B: StoreBackend> {
    table: &'a RecordTable<B>,
    graph: &'a RelationGraph,
}

impl<'a, B: StoreBackend> AssociationResolver<'a, B> {
    pub fn new(table: &'a RecordTable<B>, graph: &'a RelationGraph) -> Self {
        Self { table, graph }
    }

    /// Returns every matching record with its includes expanded.
    pub fn find_all(
        &self,
        name: &str,
        filter: &Filter,
        includes: &[IncludeSpec],
    ) -> RepoResult<Vec<Record>> {
        let associations = parse_associations(includes);
        let mut items = self.table.find_all(name, filter)?;
        for record in &mut items {
            self.load_associations(name, record, &associations)?;
        }
        Ok(items)
    }

    /// Returns the first matching record with its includes expanded, or
    /// `None` when nothing matches.
    pub fn find_one(
        &self,
        name: &str,
        filter: &Filter,
        includes: &[IncludeSpec],
    ) -> RepoResult<Option<Record>> {
        let Some(mut record) = self.table.find_one(name, filter)? else {
            return Ok(None);
        };
        let associations = parse_associations(includes);
        self.load_associations(name, &mut record, &associations)?;
        Ok(Some(record))
    }

    /// Attaches each association's child records onto `record`, in include
    /// order.
    ///
    /// Mutates the record in place: `record[child] = fetched records`.
    pub fn load_associations(
        &self,
        parent: &str,
        record: &mut Record,
        associations: &[Association],
    ) -> RepoResult<()> {
        for association in associations {
            let mut filter = Filter::new();
            for declaration in self.graph.declarations_for(&association.name) {
                if declaration.parent != parent {
                    continue;
                }
                // A record without an id degrades to the same over-fetch as
                // an unregistered relation.
                if let Some(id) = record.id() {
                    filter.insert(declaration.foreign_key.clone(), Value::from(id));
                }
            }

            // Recursion point: nested deps resolve one level further.
            let children = self.find_all(&association.name, &filter, &association.deps)?;
            trace!(
                "event=association_load module=relation parent={parent} child={} filtered={} count={}",
                association.name,
                !filter.is_empty(),
                children.len()
            );

            let values = children.into_iter().map(Value::from).collect();
            record.insert(association.name.clone(), Value::Array(values));
        }
        Ok(())
    }
}
