//! In-process fixture data store for seeding and querying test data.
//! This crate is the single source of truth for record, filter and
//! association semantics.

pub mod logging;
pub mod model;
pub mod relation;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{Filter, Record, ID_FIELD};
pub use relation::graph::{BelongsTo, RelationGraph};
pub use relation::include::{parse_associations, Association, IncludeSpec};
pub use relation::resolver::AssociationResolver;
pub use repo::record_table::{find_index, generate_id, RecordTable, RepoError, RepoResult};
pub use service::fixture_store::{Collection, FindOptions, FixtureStore};
pub use store::{MemoryBackend, SqliteBackend, StoreBackend, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
