//! Registry of `belongsTo` declarations between collections.
//!
//! # Responsibility
//! - Map each child collection to the parents its records reference.
//! - Keep registration semantics explicit: last write per child wins.
//!
//! # Invariants
//! - State is owned per store instance, never process-global.
//! - Registration does not validate that parent collections exist.

use log::debug;
use std::collections::BTreeMap;

/// One `belongsTo` declaration: records of the child collection reference
/// the named parent collection through `foreign_key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BelongsTo {
    pub parent: String,
    pub foreign_key: String,
}

impl BelongsTo {
    pub fn new(parent: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            foreign_key: foreign_key.into(),
        }
    }
}

/// In-process relation registry keyed by child collection name.
#[derive(Debug, Default)]
pub struct RelationGraph {
    relations: BTreeMap<String, Vec<BelongsTo>>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the full declaration list for one child collection,
    /// replacing any prior registration for that child.
    pub fn belongs_to(&mut self, child: &str, declarations: Vec<BelongsTo>) {
        debug!(
            "event=relation_register module=relation child={child} declarations={}",
            declarations.len()
        );
        self.relations.insert(child.to_string(), declarations);
    }

    /// Returns the declarations registered for one child collection.
    ///
    /// An unregistered child reads as the empty slice.
    pub fn declarations_for(&self, child: &str) -> &[BelongsTo] {
        self.relations
            .get(child)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{BelongsTo, RelationGraph};

    #[test]
    fn unregistered_child_reads_as_empty() {
        let graph = RelationGraph::new();
        assert!(graph.declarations_for("comments").is_empty());
        assert!(graph.is_empty());
    }

    #[test]
    fn registration_replaces_prior_declarations() {
        let mut graph = RelationGraph::new();
        graph.belongs_to("comments", vec![BelongsTo::new("posts", "post_id")]);
        graph.belongs_to("comments", vec![BelongsTo::new("users", "user_id")]);

        let declarations = graph.declarations_for("comments");
        assert_eq!(declarations, [BelongsTo::new("users", "user_id")]);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn child_can_reference_multiple_parents() {
        let mut graph = RelationGraph::new();
        graph.belongs_to(
            "comments",
            vec![
                BelongsTo::new("posts", "post_id"),
                BelongsTo::new("users", "author_id"),
            ],
        );
        assert_eq!(graph.declarations_for("comments").len(), 2);
    }
}
