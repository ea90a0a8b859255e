//! Dynamic record model shared by every collection.
//!
//! # Responsibility
//! - Define the schemaless record and exact-match filter shapes.
//! - Keep equality semantics strict and documented in one place.
//!
//! # Invariants
//! - Every persisted record carries a positive integer `id` field.
//! - Field comparison never coerces between JSON value kinds.

pub mod record;
