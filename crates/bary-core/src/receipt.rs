//! # Receipts
//!
//! Finalizing a cart freezes it into an immutable [`Receipt`] snapshot:
//! totals, rate, currency, and the billed items exactly as they were. The
//! history is a list of these snapshots; display rows and exports are
//! derived from the snapshot alone, never by re-pricing against a current
//! rate.
//!
//! ## Finalize Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart (items + currency + rate)      Settings (guest header)           │
//! │                │                           │                            │
//! │                └─────────┬─────────────────┘                            │
//! │                          ▼                                              │
//! │              Receipt::finalize(cart, settings)                          │
//! │                          │                                              │
//! │          has_charges? ── no ──► Err(EmptyReceipt)                       │
//! │                          │                                              │
//! │                         yes                                             │
//! │                          ▼                                              │
//! │   Receipt { id, createdAt, totals, rate, charged items + gifts }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::item::{ItemKind, LineItem};
use crate::money::{round0, round2, Currency, ExchangeRate};
use crate::settings::Settings;

// =============================================================================
// Receipt
// =============================================================================

/// An immutable, finalized billing snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// UUID v4, assigned at finalize time.
    pub id: String,
    /// Finalization timestamp (UTC).
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Display currency the totals are denominated in.
    pub currency: Currency,
    /// Exchange rate the totals were computed with.
    pub rate: ExchangeRate,
    /// Net total (discount already subtracted).
    pub total: Decimal,
    pub discount: Decimal,
    /// The billed items: everything that contributed, plus selected gifts,
    /// with their input payloads frozen.
    pub items: Vec<LineItem>,
}

impl Receipt {
    /// Freezes a cart into a receipt.
    ///
    /// ## Errors
    /// [`CoreError::EmptyReceipt`] when no item contributes; a selected gift
    /// alone is not billable.
    pub fn finalize(cart: &Cart<'_>, settings: &Settings) -> CoreResult<Receipt> {
        if !cart.has_charges() {
            return Err(CoreError::EmptyReceipt);
        }

        let totals = cart.totals();
        let items = cart
            .items
            .iter()
            .filter(|item| item.on_receipt())
            .cloned()
            .collect();

        Ok(Receipt {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            guest_name: settings.guest_name.clone(),
            reservation: settings.reservation.clone(),
            note: settings.receipt_note.clone(),
            currency: cart.currency,
            rate: cart.rate,
            total: totals.total,
            discount: totals.discount,
            items,
        })
    }

    /// Display rows for this receipt, priced in its display currency.
    pub fn rows(&self) -> Vec<ReceiptRow> {
        self.items
            .iter()
            .filter(|item| item.on_receipt())
            .map(|item| self.row_for(item))
            .collect()
    }

    /// Receipt date, `DD.MM.YYYY`.
    pub fn date_label(&self) -> String {
        self.created_at.format("%d.%m.%Y").to_string()
    }

    /// Receipt date and time, `DD.MM.YYYY HH:MM`.
    pub fn datetime_label(&self) -> String {
        self.created_at.format("%d.%m.%Y %H:%M").to_string()
    }

    /// Derives one display row from a snapshot item.
    ///
    /// Per-kind pricing mirrors the aggregation directions (cityTax raw as
    /// EUR, extraPerson raw as CZK), but shows the generic converter's
    /// whole-crown convention for cross-currency manual amounts, and the
    /// converted unit price (not the line total) for standard items.
    fn row_for(&self, item: &LineItem) -> ReceiptRow {
        let rate = self.rate.value();
        let (detail, price, discount_per_unit) = match &item.kind {
            ItemKind::Gift { .. } => (RowDetail::Gift, None, None),
            ItemKind::Standard { quantity } => (
                RowDetail::Count { count: *quantity },
                Some(
                    self.rate
                        .convert(item.unit_price, item.currency, self.currency),
                ),
                item.discount_per_unit
                    .filter(|per_unit| *per_unit > Decimal::ZERO),
            ),
            ItemKind::Manual { amount } => (
                RowDetail::Amount { amount: *amount },
                Some(self.rate.convert(*amount, item.currency, self.currency)),
                None,
            ),
            ItemKind::CityTax {
                person_count,
                day_count,
            } => {
                let raw =
                    Decimal::from(*person_count) * Decimal::from(*day_count) * item.unit_price;
                let price = match self.currency {
                    Currency::Eur => raw,
                    Currency::Czk => round0(raw * rate),
                };
                (
                    RowDetail::PersonDays {
                        persons: *person_count,
                        days: *day_count,
                    },
                    Some(price),
                    None,
                )
            }
            ItemKind::ExtraPerson {
                person_count,
                day_count,
            } => {
                let raw =
                    Decimal::from(*person_count) * Decimal::from(*day_count) * item.unit_price;
                let price = match self.currency {
                    Currency::Czk => raw,
                    Currency::Eur => round2(raw / rate),
                };
                (
                    RowDetail::PersonDays {
                        persons: *person_count,
                        days: *day_count,
                    },
                    Some(price),
                    None,
                )
            }
        };

        ReceiptRow {
            label: item.name.clone(),
            detail,
            note: item.note.clone(),
            price,
            discount_per_unit,
        }
    }
}

// =============================================================================
// Receipt Rows
// =============================================================================

/// One printable line of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRow {
    pub label: String,
    pub detail: RowDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Price in the receipt's display currency; absent for gifts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Per-unit discount passthrough for renderers, `standard` rows only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_per_unit: Option<Decimal>,
}

/// What the row's tally column shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RowDetail {
    /// Unit count of a `standard` row; the price column holds the unit
    /// price.
    Count { count: u32 },
    /// Person/day counts of a `cityTax`/`extraPerson` row; the price column
    /// holds the whole fee.
    PersonDays { persons: u32, days: u32 },
    /// Entered amount of a `manual` row, in the item's native currency.
    Amount { amount: Decimal },
    /// Gift marker; no price.
    Gift,
}

// =============================================================================
// Unit Tests
// =============================================================================
