//! Record table layer over the key-value persistence surface.
//!
//! # Responsibility
//! - Provide CRUD and exact-match lookup per named collection.
//! - Keep serialization details inside the persistence boundary.
//!
//! # Invariants
//! - Domain "not found" outcomes are plain return values, never errors.
//! - Errors are reserved for backend faults and corrupt persisted payloads.

pub mod record_table;
