//! # Billing Store
//!
//! JSON record persistence for the billing engine. One directory, one file
//! per logical record:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <data dir>/                                                            │
//! │    rate.json       ExchangeRate        fallback: 25.0                   │
//! │    items.json      Catalog             fallback: seed catalog           │
//! │    history.json    Vec<Receipt>        fallback: empty                  │
//! │    settings.json   Settings            fallback: defaults               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Load Semantics
//!
//! Loads never fail. An absent record means "first run" and yields the
//! fallback silently; an unreadable or corrupt record is logged via
//! `tracing::warn!` and yields the fallback too, so one bad file never takes
//! the application down. The bad record stays on disk until the next save
//! overwrites it.
//!
//! Saves are the honest side: filesystem and serialization failures surface
//! as [`StoreError`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use bary_core::{Catalog, ExchangeRate, Receipt, Settings};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Record Files
// =============================================================================

const RATE_FILE: &str = "rate.json";
const ITEMS_FILE: &str = "items.json";
const HISTORY_FILE: &str = "history.json";
const SETTINGS_FILE: &str = "settings.json";

/// How many receipts [`BillingStore::prune_history`] keeps by default.
pub const HISTORY_PRUNE_KEEP: usize = 10;

// =============================================================================
// BillingStore
// =============================================================================

/// File-backed store for every record the billing engine persists.
#[derive(Debug, Clone)]
pub struct BillingStore {
    root: PathBuf,
}

impl BillingStore {
    /// Opens a store rooted at `root`, creating the directory when absent.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "Opened billing store");
        Ok(BillingStore { root })
    }

    /// The directory this store reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // =========================================================================
    // Exchange Rate
    // =========================================================================

    /// Loads the persisted exchange rate, falling back to the default of
    /// 25.0 CZK/EUR. A persisted non-positive rate fails validation during
    /// deserialization and lands on the fallback like any other corruption.
    pub fn load_rate(&self) -> ExchangeRate {
        self.load_or(RATE_FILE, ExchangeRate::default)
    }

    pub fn save_rate(&self, rate: ExchangeRate) -> StoreResult<()> {
        self.save(RATE_FILE, &rate)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Loads the item catalog, falling back to the seed catalog.
    pub fn load_catalog(&self) -> Catalog {
        self.load_or(ITEMS_FILE, Catalog::seed)
    }

    pub fn save_catalog(&self, catalog: &Catalog) -> StoreResult<()> {
        self.save(ITEMS_FILE, catalog)
    }

    // =========================================================================
    // Receipt History
    // =========================================================================

    /// Loads the receipt history, newest first. Falls back to an empty
    /// history.
    pub fn load_history(&self) -> Vec<Receipt> {
        self.load_or(HISTORY_FILE, Vec::new)
    }

    pub fn save_history(&self, history: &[Receipt]) -> StoreResult<()> {
        self.save(HISTORY_FILE, &history)
    }

    /// Prepends `receipt` to the history and saves it. Returns the new
    /// history length.
    pub fn push_receipt(&self, receipt: &Receipt) -> StoreResult<usize> {
        let mut history = self.load_history();
        history.insert(0, receipt.clone());
        self.save_history(&history)?;
        debug!(
            id = %receipt.id,
            total = %receipt.total,
            entries = history.len(),
            "Receipt added to history"
        );
        Ok(history.len())
    }

    /// Removes and returns the receipt at `index` (0 = newest).
    ///
    /// ## Errors
    /// [`StoreError::ReceiptNotFound`] when `index` is out of range.
    pub fn delete_receipt(&self, index: usize) -> StoreResult<Receipt> {
        let mut history = self.load_history();
        if index >= history.len() {
            return Err(StoreError::receipt_not_found(index));
        }
        let removed = history.remove(index);
        self.save_history(&history)?;
        debug!(id = %removed.id, index, "Receipt deleted from history");
        Ok(removed)
    }

    /// Truncates the history to its newest `keep` entries. Returns how many
    /// receipts were dropped; saves only when something was.
    pub fn prune_history(&self, keep: usize) -> StoreResult<usize> {
        let mut history = self.load_history();
        if history.len() <= keep {
            return Ok(0);
        }
        let dropped = history.len() - keep;
        history.truncate(keep);
        self.save_history(&history)?;
        debug!(dropped, keep, "Pruned receipt history");
        Ok(dropped)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Loads the billing settings, falling back to the defaults.
    pub fn load_settings(&self) -> Settings {
        self.load_or(SETTINGS_FILE, Settings::default)
    }

    pub fn save_settings(&self, settings: &Settings) -> StoreResult<()> {
        self.save(SETTINGS_FILE, settings)
    }

    // =========================================================================
    // Bulk Resets
    // =========================================================================

    /// Removes the catalog, history, and settings records. The exchange rate
    /// survives; guests change daily, the bank rate does not.
    pub fn clear_working_data(&self) -> StoreResult<()> {
        for file in [ITEMS_FILE, HISTORY_FILE, SETTINGS_FILE] {
            self.remove(file)?;
        }
        debug!("Cleared working data");
        Ok(())
    }

    /// Removes every record, returning the store to its first-run state.
    pub fn factory_reset(&self) -> StoreResult<()> {
        for file in [RATE_FILE, ITEMS_FILE, HISTORY_FILE, SETTINGS_FILE] {
            self.remove(file)?;
        }
        debug!("Factory reset");
        Ok(())
    }

    // =========================================================================
    // Record Plumbing
    // =========================================================================

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// Reads and deserializes a record, handing back `fallback()` when the
    /// file is absent, unreadable, or corrupt.
    fn load_or<T, F>(&self, file: &str, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.path(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(file, "Record absent, using fallback");
                return fallback();
            }
            Err(err) => {
                warn!(file, error = %err, "Record unreadable, using fallback");
                return fallback();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(file, error = %err, "Record corrupt, using fallback");
                fallback()
            }
        }
    }

    fn save<T: Serialize>(&self, file: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path(file), json)?;
        debug!(file, "Record saved");
        Ok(())
    }

    fn remove(&self, file: &str) -> StoreResult<()> {
        match fs::remove_file(self.path(file)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
