//! # Line Items
//!
//! The chargeable entry model: catalog entries overlaid with per-stay user
//! input.
//!
//! ## Item Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Line Item Kinds                                  │
//! │                                                                         │
//! │  kind          input payload            priced as                       │
//! │  ───────────   ──────────────────────   ─────────────────────────────   │
//! │  standard      quantity                 unit price × quantity           │
//! │  manual        amount                   the amount itself               │
//! │  cityTax       personCount, dayCount    unit price × persons × days     │
//! │  extraPerson   personCount, dayCount    unit price × persons × days     │
//! │  gift          selected                 never priced                    │
//! │                                                                         │
//! │  The payload is the transient per-session input; zero means the item    │
//! │  is untouched and contributes nothing.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each kind carries exactly the fields it prices with, so states like a
//! per-unit item holding person counts cannot be constructed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::money::Currency;

// =============================================================================
// Item Kind
// =============================================================================

/// Pricing behavior of a line item, together with its transient user input.
///
/// Serialized with a `kind` tag alongside the payload fields, so a catalog
/// record reads `{ "kind": "cityTax", "personCount": 2, "dayCount": 3 }`.
/// Missing payload fields deserialize as zero (an untouched item), never as
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ItemKind {
    /// Priced per unit count.
    Standard {
        #[serde(default)]
        quantity: u32,
    },
    /// The guest is billed an absolute amount; the unit price is ignored.
    Manual {
        #[serde(default)]
        amount: Decimal,
    },
    /// Per-person, per-day fee.
    #[serde(rename_all = "camelCase")]
    CityTax {
        #[serde(default)]
        person_count: u32,
        #[serde(default)]
        day_count: u32,
    },
    /// Per-person, per-day fee with the opposite conversion direction to
    /// [`ItemKind::CityTax`] (see [`crate::cart::Cart::totals`]).
    #[serde(rename_all = "camelCase")]
    ExtraPerson {
        #[serde(default)]
        person_count: u32,
        #[serde(default)]
        day_count: u32,
    },
    /// Tracked on the receipt when selected, never priced.
    Gift {
        #[serde(default)]
        selected: bool,
    },
}

impl ItemKind {
    /// The same variant with its input payload cleared to the untouched
    /// state.
    pub fn cleared(&self) -> ItemKind {
        match self {
            ItemKind::Standard { .. } => ItemKind::Standard { quantity: 0 },
            ItemKind::Manual { .. } => ItemKind::Manual {
                amount: Decimal::ZERO,
            },
            ItemKind::CityTax { .. } => ItemKind::CityTax {
                person_count: 0,
                day_count: 0,
            },
            ItemKind::ExtraPerson { .. } => ItemKind::ExtraPerson {
                person_count: 0,
                day_count: 0,
            },
            ItemKind::Gift { .. } => ItemKind::Gift { selected: false },
        }
    }

    /// True for gift entries.
    pub fn is_gift(&self) -> bool {
        matches!(self, ItemKind::Gift { .. })
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One catalog-derived chargeable entry.
///
/// Catalog fields (`category` through `note`) persist indefinitely; the
/// `kind` payload is per-session input cleared by [`LineItem::cleared`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Display grouping; order of categories is fixed (see [`Category`]).
    pub category: Category,
    /// Display label.
    pub name: String,
    /// Non-negative price per unit (or per person-day), in `currency`.
    pub unit_price: Decimal,
    /// The item's single native currency.
    pub currency: Currency,
    /// Pricing kind plus transient input payload.
    #[serde(flatten)]
    pub kind: ItemKind,
    /// Seeded catalog items cannot be renamed or deleted.
    #[serde(default)]
    pub fixed: bool,
    /// Hidden items stay in the catalog but are not offered for billing.
    #[serde(default)]
    pub hidden: bool,
    /// Optional per-unit discount, `standard` items only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_per_unit: Option<Decimal>,
    /// Free-text annotation, display-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LineItem {
    /// A per-unit priced item.
    pub fn standard(
        category: Category,
        name: impl Into<String>,
        unit_price: Decimal,
        currency: Currency,
    ) -> Self {
        LineItem {
            category,
            name: name.into(),
            unit_price,
            currency,
            kind: ItemKind::Standard { quantity: 0 },
            fixed: false,
            hidden: false,
            discount_per_unit: None,
            note: None,
        }
    }

    /// A manual-amount item (unit price kept for display, ignored for
    /// pricing).
    pub fn manual(
        category: Category,
        name: impl Into<String>,
        unit_price: Decimal,
        currency: Currency,
    ) -> Self {
        LineItem {
            kind: ItemKind::Manual {
                amount: Decimal::ZERO,
            },
            ..LineItem::standard(category, name, unit_price, currency)
        }
    }

    /// A per-person, per-day city tax fee.
    pub fn city_tax(
        category: Category,
        name: impl Into<String>,
        unit_price: Decimal,
        currency: Currency,
    ) -> Self {
        LineItem {
            kind: ItemKind::CityTax {
                person_count: 0,
                day_count: 0,
            },
            ..LineItem::standard(category, name, unit_price, currency)
        }
    }

    /// A per-person, per-day extra-person fee.
    pub fn extra_person(
        category: Category,
        name: impl Into<String>,
        unit_price: Decimal,
        currency: Currency,
    ) -> Self {
        LineItem {
            kind: ItemKind::ExtraPerson {
                person_count: 0,
                day_count: 0,
            },
            ..LineItem::standard(category, name, unit_price, currency)
        }
    }

    /// A gift entry; always in the Gifts category, never priced.
    pub fn gift(name: impl Into<String>) -> Self {
        LineItem {
            kind: ItemKind::Gift { selected: false },
            ..LineItem::standard(Category::Gifts, name, Decimal::ZERO, Currency::Czk)
        }
    }

    /// Marks the item as part of the seeded catalog.
    pub fn seeded(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Attaches a display note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Attaches a per-unit discount.
    pub fn with_discount(mut self, per_unit: Decimal) -> Self {
        self.discount_per_unit = Some(per_unit);
        self
    }

    /// Whether this item adds to the cart total.
    ///
    /// Gifts never contribute, even when selected; every other kind
    /// contributes once its input payload is filled in.
    pub fn contributes(&self) -> bool {
        match &self.kind {
            ItemKind::Gift { .. } => false,
            ItemKind::CityTax {
                person_count,
                day_count,
            }
            | ItemKind::ExtraPerson {
                person_count,
                day_count,
            } => *person_count > 0 && *day_count > 0,
            ItemKind::Manual { amount } => *amount > Decimal::ZERO,
            ItemKind::Standard { quantity } => *quantity > 0,
        }
    }

    /// Whether this item belongs on a finalized receipt: everything that
    /// contributes, plus selected gifts.
    pub fn on_receipt(&self) -> bool {
        self.contributes() || matches!(self.kind, ItemKind::Gift { selected: true })
    }

    /// A copy with the transient input payload cleared; catalog fields are
    /// preserved unchanged.
    pub fn cleared(&self) -> LineItem {
        LineItem {
            kind: self.kind.cleared(),
            ..self.clone()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
