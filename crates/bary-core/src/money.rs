//! # Money & Currency
//!
//! Two-currency money handling for guest billing: Czech crowns (CZK) and
//! euros (EUR), bridged by a single CZK-per-EUR exchange rate.
//!
//! ## Conversion Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Currency Conversion                                 │
//! │                                                                         │
//! │              rate = CZK per 1 EUR (e.g. 25.0)                          │
//! │                                                                         │
//! │   CZK ──── amount / rate ── round2 ────► EUR   (2 decimals)            │
//! │                                                                         │
//! │   EUR ──── amount * rate ── round0 ────► CZK   (whole crowns)          │
//! │                                                                         │
//! │   same currency ───────────────────────► unchanged                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Conventions
//! All financial rounding is round-half-away-from-zero:
//! - EUR-valued results round to 2 decimals ([`round2`])
//! - CZK-valued conversion results round to whole crowns ([`round0`]),
//!   matching how crown prices are displayed on receipts
//!
//! ## Why Decimal
//! Prices, rates, and totals use [`rust_decimal::Decimal`]. Binary floats
//! drift on repeated add/round cycles; exact decimals keep a receipt's total
//! reproducible from its snapshot.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to 2 decimal places, half away from zero.
///
/// Used for EUR-valued results and for final cart totals.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole units, half away from zero.
///
/// Used for CZK-valued conversion results (crown prices are shown without
/// decimals).
pub fn round0(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Currency
// =============================================================================

/// The two currencies guests can be billed in.
///
/// Every catalog item is priced in exactly one native currency; the cart has
/// a display currency that totals are converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Czech crown (Kč).
    Czk,
    /// Euro (€).
    Eur,
}

impl Currency {
    /// ISO-style code used in records and exports.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Czk => "CZK",
            Currency::Eur => "EUR",
        }
    }

    /// Display symbol shown next to amounts.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Czk => "Kč",
            Currency::Eur => "€",
        }
    }

    /// The other currency; the front desk toggles between the two.
    pub const fn other(&self) -> Currency {
        match self {
            Currency::Czk => Currency::Eur,
            Currency::Eur => Currency::Czk,
        }
    }
}

impl Default for Currency {
    /// Crowns are the house currency.
    fn default() -> Self {
        Currency::Czk
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// =============================================================================
// Exchange Rate
// =============================================================================

/// A validated CZK-per-EUR exchange rate.
///
/// Construction rejects zero and negative values, so conversion and
/// aggregation never have to re-check the rate. Deserialization goes through
/// the same check; a corrupt persisted rate fails to load instead of
/// poisoning every total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// Creates a rate, rejecting `rate <= 0`.
    pub fn new(rate: Decimal) -> Result<Self, ValidationError> {
        if rate <= Decimal::ZERO {
            return Err(ValidationError::InvalidRate {
                given: rate.to_string(),
            });
        }
        Ok(ExchangeRate(rate))
    }

    /// The raw CZK-per-EUR value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Converts `amount` between currencies.
    ///
    /// ## Behavior
    /// - `from == to`: returns `amount` unchanged
    /// - CZK→EUR: `round2(amount / rate)`
    /// - EUR→CZK: `round0(amount * rate)` (whole crowns)
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Decimal {
        if from == to {
            return amount;
        }
        match to {
            Currency::Eur => round2(amount / self.0),
            Currency::Czk => round0(amount * self.0),
        }
    }
}

impl Default for ExchangeRate {
    /// 25.0 CZK per EUR, the documented fallback rate.
    fn default() -> Self {
        ExchangeRate(Decimal::from(25))
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = ValidationError;

    fn try_from(rate: Decimal) -> Result<Self, Self::Error> {
        ExchangeRate::new(rate)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Decimal {
        rate.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount with its currency symbol, e.g. `150 Kč` or `12.5 €`.
///
/// Insignificant trailing zeros are trimmed; receipts show `135`, not
/// `135.00`.
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    format!("{} {}", amount.normalize(), currency.symbol())
}

// =============================================================================
// Unit Tests
// =============================================================================


// =============================================================================
// Property Tests
// =============================================================================
