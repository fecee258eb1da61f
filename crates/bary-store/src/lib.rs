//! # bary-store: Persistence & Export Layer for Bary
//!
//! This crate owns everything in Bary that touches the filesystem: the JSON
//! records the billing engine persists between sessions, and the CSV exports
//! handed to the guest or the accountant.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bary Data Flow                                  │
//! │                                                                         │
//! │  UI / host application                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    bary-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────────┐      ┌────────────────────────┐    │   │
//! │  │   │     BillingStore      │      │      CSV Export        │    │   │
//! │  │   │      (store.rs)       │      │      (export.rs)       │    │   │
//! │  │   │                       │      │                        │    │   │
//! │  │   │  rate.json            │      │  receipt_csv           │    │   │
//! │  │   │  items.json           │      │  history_csv           │    │   │
//! │  │   │  history.json         │      │                        │    │   │
//! │  │   │  settings.json        │      │  ';' + BOM dialect     │    │   │
//! │  │   └───────────────────────┘      └────────────────────────┘    │   │
//! │  │               │                              │                  │   │
//! │  └───────────────┼──────────────────────────────┼──────────────────┘   │
//! │                  ▼                              ▼                      │
//! │          <data dir>/*.json               CSV bytes (Vec<u8>)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All domain types come from `bary-core`; this crate adds no pricing logic
//! of its own.
//!
//! ## Module Organization
//!
//! - [`store`] - JSON record store with fall-back-to-default loads
//! - [`export`] - Receipt and history CSV rendering
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bary_store::BillingStore;
//!
//! let store = BillingStore::open(data_dir)?;
//!
//! // Loads never fail; first run yields the documented defaults
//! let rate = store.load_rate();
//! let catalog = store.load_catalog();
//!
//! // Finalize elsewhere, then persist and export
//! store.push_receipt(&receipt)?;
//! let csv = bary_store::receipt_csv(&receipt)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use export::{history_csv, receipt_csv, HISTORY_CSV_FILE_NAME, RECEIPT_CSV_FILE_NAME};
pub use store::{BillingStore, HISTORY_PRUNE_KEEP};
