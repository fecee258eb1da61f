//! # Store Error Types
//!
//! Error handling for the persistence and export layer.
//!
//! ## Design
//!
//! Loads are deliberately infallible at the API surface: a missing or corrupt
//! record falls back to its documented default inside [`BillingStore`], so no
//! load error ever reaches the caller. Everything that *writes* (JSON saves,
//! CSV exports) reports through [`StoreError`].
//!
//! [`BillingStore`]: crate::store::BillingStore

use thiserror::Error;

/// Errors that can occur while saving records or building exports.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing a record file failed at the filesystem level.
    ///
    /// ## When This Occurs
    /// - The data directory is not writable
    /// - The disk is full
    /// - A record file is held open elsewhere (platform dependent)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized to JSON.
    ///
    /// ## When This Occurs
    /// Practically never for the record types this crate persists; kept as a
    /// distinct variant so a failure is reported precisely rather than
    /// panicking inside a save.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A CSV export could not be written.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// A history operation referenced a receipt position that does not exist.
    ///
    /// ## When This Occurs
    /// - Deleting a receipt after the history was pruned or cleared elsewhere
    /// - An index computed against a stale copy of the history
    #[error("no receipt at history position {index}")]
    ReceiptNotFound { index: usize },
}

impl StoreError {
    /// Creates a [`StoreError::ReceiptNotFound`] for the given history position.
    pub fn receipt_not_found(index: usize) -> Self {
        StoreError::ReceiptNotFound { index }
    }
}

/// Convenient result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
