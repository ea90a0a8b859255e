//! Store facade binding collections, relations and resolution together.
//!
//! # Responsibility
//! - Expose the public per-collection operation surface.
//! - Keep callers decoupled from table/resolver wiring.

pub mod fixture_store;
