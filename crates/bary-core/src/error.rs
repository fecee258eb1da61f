//! # Error Types
//!
//! Domain-specific error types for bary-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bary-core errors (this file)                                          │
//! │  ├── CoreError        - Catalog/receipt rule violations                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bary-store errors (separate crate)                                    │
//! │  └── StoreError       - Record load/save failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → host UI message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, index, rate value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core billing rule errors.
///
/// These errors represent catalog or receipt rule violations.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog item at the given index.
    ///
    /// ## When This Occurs
    /// - The host passes a stale index after items were removed
    /// - A persisted index outlives a catalog edit
    #[error("No catalog item at index {index}")]
    ItemNotFound { index: usize },

    /// The item is part of the seeded catalog and cannot be changed.
    ///
    /// ## When This Occurs
    /// - Removing or renaming a seeded item ("City tax", "Breakfast", ...)
    ///
    /// Seeded items carry the pricing rules the rest of the tool depends on,
    /// so only user-added items are editable.
    #[error("'{name}' is a fixed catalog item and cannot be changed")]
    FixedItem { name: String },

    /// Finalizing a cart with zero charged items.
    ///
    /// ## When This Occurs
    /// - Saving a receipt before entering any quantities or amounts
    /// - Saving a cart that holds selected gifts only (gifts are never
    ///   charged)
    ///
    /// ## User Workflow
    /// ```text
    /// Save receipt
    ///      │
    ///      ▼
    /// Cart::has_charges() == false
    ///      │
    ///      ▼
    /// EmptyReceipt
    ///      │
    ///      ▼
    /// UI shows: "Nothing to bill yet"
    /// ```
    #[error("Receipt has no charged items")]
    EmptyReceipt,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before pricing logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Exchange rate is zero or negative.
    ///
    /// The engine only ever sees rates that passed this check; conversion
    /// and aggregation assume a positive rate.
    #[error("Exchange rate must be positive, got {given}")]
    InvalidRate { given: String },

    /// Monetary value is negative where only non-negative is meaningful.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
