//! Per-stay settings: the display currency plus the guest header fields
//! stamped onto finalized receipts.

use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// Front-desk settings record.
///
/// Persisted between sessions; missing fields fall back to defaults so
/// records written by older versions still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Currency the running total and new receipts are displayed in.
    pub currency: Currency,
    /// Guest name printed on the receipt header.
    pub guest_name: Option<String>,
    /// Reservation reference printed on the receipt header.
    pub reservation: Option<String>,
    /// Free-text note carried onto the next finalized receipt.
    pub receipt_note: Option<String>,
}
