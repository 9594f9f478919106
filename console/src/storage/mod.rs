//! Storage module
//!
//! In-memory snapshots of backend collections.

pub mod entity_store;

pub use entity_store::{EntityStore, SharedStore};
