//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with tables:
//! - medicines(id, name, packs, items_per_pack, total_qty, expiry)
//! - equipment(id, name, quantity, description)

pub mod schema;
pub mod sqlite;

pub use sqlite::{InventoryStats, InventoryStore};
