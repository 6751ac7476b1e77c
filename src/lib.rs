//! # Clinic Inventory
//!
//! Medicines and equipment for a small clinic, kept in a local SQLite file.
//!
//! Clinic Inventory provides:
//! - Typed records for medicines and equipment with derived stock figures
//! - A parse-and-validate step from raw form text to typed drafts
//! - SQLite-backed storage with one connection per operation
//! - Case-insensitive substring search and a fixed low-stock rule
//! - Per-entity session state for interactive front ends

pub mod medicine;
pub mod equipment;
pub mod validation;
pub mod storage;
pub mod search;
pub mod session;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use medicine::{Medicine, MedicineDraft};
pub use equipment::{Equipment, EquipmentDraft};
pub use validation::{EquipmentForm, MedicineForm};
pub use storage::InventoryStore;
pub use session::Session;

/// Result type alias for inventory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for inventory operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0}")]
    Selection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Whether the error was raised before storage was touched
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Selection(_))
    }
}
