//! # bary-core: Pure Pricing Engine for Bary Guest Billing
//!
//! This crate contains the pure, deterministic core of the Bary billing
//! tool: the two-currency money model, the line-item catalog, cart
//! aggregation, receipt snapshots, and history statistics.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bary Data Flow                                   │
//! │                                                                         │
//! │  Host (front-desk UI, CLI, tests)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bary-core (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐  │   │
//! │  │   │   Catalog    │──►│     Cart     │──►│     Receipt      │  │   │
//! │  │   │ (items +     │   │ (snapshot →  │   │ (frozen totals + │  │   │
//! │  │   │  user input) │   │  totals)     │   │  billed items)   │  │   │
//! │  │   └──────────────┘   └──────────────┘   └────────┬─────────┘  │   │
//! │  │                                                  │             │   │
//! │  │                                         ┌────────▼─────────┐  │   │
//! │  │                                         │      Stats       │  │   │
//! │  │                                         │ (over history)   │  │   │
//! │  │                                         └──────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bary-store (JSON records on disk, CSV export)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`money`] - Currencies, validated exchange rate, rounding, conversion
//! - [`item`] - Line items and per-kind input payloads
//! - [`catalog`] - Category set, seed data, catalog editing
//! - [`cart`] - Cart snapshots, total aggregation, reset
//! - [`receipt`] - Finalized receipt snapshots and display rows
//! - [`settings`] - Per-stay settings record
//! - [`stats`] - History statistics
//! - [`validation`] - Boundary validation and input normalization
//! - [`error`] - Core error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bary_core::{Cart, Catalog, Currency, ExchangeRate, Receipt, Settings};
//!
//! let mut catalog = Catalog::seed();
//! // ... overlay user input on catalog.items_mut() ...
//!
//! let rate = ExchangeRate::default();
//! let cart = Cart::new(catalog.items(), Currency::Czk, rate);
//! let totals = cart.totals();
//!
//! let receipt = Receipt::finalize(&cart, &Settings::default())?;
//! catalog.reset();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod item;
pub mod money;
pub mod receipt;
pub mod settings;
pub mod stats;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::{reset_cart, Cart, CartTotals};
pub use catalog::{Catalog, Category};
pub use error::{CoreError, CoreResult, ValidationError};
pub use item::{ItemKind, LineItem};
pub use money::{format_amount, round0, round2, Currency, ExchangeRate};
pub use receipt::{Receipt, ReceiptRow, RowDetail};
pub use settings::Settings;
pub use stats::{
    revenue_by_day, summarize, top_items, DailyRevenue, HistoryStats, ItemTally,
};
pub use validation::{
    normalize_amount, normalize_count, validate_item_name, validate_non_negative,
    ValidationResult,
};

// =============================================================================
// Constants
// =============================================================================

/// Maximum length of item and gift labels.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// How many entries the statistics view shows in its top-items list.
pub const TOP_ITEMS_LIMIT: usize = 5;
