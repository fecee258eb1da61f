//! History statistics: revenue split per currency, top charged items, and
//! per-day revenue for the overview chart.
//!
//! Everything here is a pure fold over receipt snapshots; totals come from
//! the snapshots themselves and are never re-priced.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::ItemKind;
use crate::money::{round0, round2, Currency};
use crate::receipt::Receipt;

// =============================================================================
// Summary
// =============================================================================

/// Headline numbers for the statistics view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub receipt_count: usize,
    /// Sum of CZK-denominated receipt totals, whole crowns.
    pub revenue_czk: Decimal,
    /// Sum of EUR-denominated receipt totals, 2 decimals.
    pub revenue_eur: Decimal,
    /// Mean CZK receipt, whole crowns; zero when no CZK receipts exist.
    pub average_czk: Decimal,
}

/// Summarizes the whole history.
pub fn summarize(history: &[Receipt]) -> HistoryStats {
    let mut czk_sum = Decimal::ZERO;
    let mut czk_count = 0u32;
    let mut eur_sum = Decimal::ZERO;

    for receipt in history {
        match receipt.currency {
            Currency::Czk => {
                czk_sum += receipt.total;
                czk_count += 1;
            }
            Currency::Eur => eur_sum += receipt.total,
        }
    }

    let average_czk = if czk_count > 0 {
        round0(czk_sum / Decimal::from(czk_count))
    } else {
        Decimal::ZERO
    };

    HistoryStats {
        receipt_count: history.len(),
        revenue_czk: round0(czk_sum),
        revenue_eur: round2(eur_sum),
        average_czk,
    }
}

// =============================================================================
// Top Items
// =============================================================================

/// How often one item was billed across the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTally {
    pub name: String,
    pub count: u64,
}

/// The most billed items, by name.
///
/// `standard` items count their quantity, every other charged kind counts
/// once per receipt, gifts are ignored. Sorted by count descending, name
/// ascending on ties, truncated to `limit`.
pub fn top_items(history: &[Receipt], limit: usize) -> Vec<ItemTally> {
    let mut counts: HashMap<&str, u64> = HashMap::new();

    for receipt in history {
        for item in &receipt.items {
            let tally = match &item.kind {
                ItemKind::Gift { .. } => continue,
                ItemKind::Standard { quantity } => u64::from(*quantity).max(1),
                _ => 1,
            };
            *counts.entry(item.name.as_str()).or_default() += tally;
        }
    }

    let mut tallies: Vec<ItemTally> = counts
        .into_iter()
        .map(|(name, count)| ItemTally {
            name: name.to_string(),
            count,
        })
        .collect();
    tallies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    tallies.truncate(limit);
    tallies
}

// =============================================================================
// Per-Day Revenue
// =============================================================================

/// Revenue of one calendar day, split per currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub czk: Decimal,
    pub eur: Decimal,
}

/// Receipt totals grouped by calendar date, ascending.
pub fn revenue_by_day(history: &[Receipt]) -> Vec<DailyRevenue> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

    for receipt in history {
        let day = days.entry(receipt.created_at.date_naive()).or_default();
        match receipt.currency {
            Currency::Czk => day.0 += receipt.total,
            Currency::Eur => day.1 += receipt.total,
        }
    }

    days.into_iter()
        .map(|(date, (czk, eur))| DailyRevenue { date, czk, eur })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
