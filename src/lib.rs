//! # Stockroom - SKU-keyed inventory tracker
//!
//! Stockroom keeps one flat collection of stock records, each identified by
//! its SKU, and computes stock value (`quantity * price`).
//!
//! Stockroom provides:
//! - A `StockRepository` trait with add/list/find/update/remove/valuate
//! - An in-memory backend and a SQLite-backed backend
//! - Boundary validation of raw text input
//! - A console menu and CSV export built on the repository

pub mod record;
pub mod repository;
pub mod storage;
pub mod input;
pub mod console;
pub mod export;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use record::{StockRecord, StockUpdate, DEFAULT_LOW_STOCK_THRESHOLD};
pub use repository::{StockRepository, StockStats};
pub use storage::{MemoryStore, SqliteStore};

/// Result type alias for Stockroom operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Stockroom operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("An item with SKU {0} already exists")]
    DuplicateKey(String),

    #[error("No item found with SKU {0}")]
    NotFound(String),

    #[error("Total {0} is out of range")]
    Overflow(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Domain errors the user can correct by re-entering input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::DuplicateKey(_) | Error::NotFound(_)
        )
    }
}
