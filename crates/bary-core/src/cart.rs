//! # Cart & Totals
//!
//! Stateless aggregation over a snapshot of line items: a [`Cart`] borrows
//! the current item list plus a display currency and exchange rate, and
//! produces [`CartTotals`]. Nothing here mutates shared state; hosts own the
//! item list and pass a fresh snapshot per call.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart::totals()                                     │
//! │                                                                         │
//! │  for each item                                                          │
//! │    gift ─────────────► skipped (selected or not)                        │
//! │    cityTax ──────────► persons × days × price, raw treated as EUR       │
//! │    extraPerson ──────► persons × days × price, raw treated as CZK       │
//! │    manual ───────────► amount, cross-currency at 2 decimals             │
//! │    standard ─────────► converted unit price × quantity                  │
//! │                        └─ discountPerUnit × quantity → discount         │
//! │                                                                         │
//! │  total = round2(sum) − round2(discount)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::item::{ItemKind, LineItem};
use crate::money::{round2, Currency, ExchangeRate};

// =============================================================================
// Cart
// =============================================================================

/// An immutable pricing snapshot: items, display currency, exchange rate.
///
/// Carts are cheap throwaway views; hosts rebuild one for every displayed
/// total.
#[derive(Debug, Clone, Copy)]
pub struct Cart<'a> {
    /// The items being priced, in display order.
    pub items: &'a [LineItem],
    /// Currency the total is shown in.
    pub currency: Currency,
    /// CZK-per-EUR rate used for all conversions in this snapshot.
    pub rate: ExchangeRate,
}

/// Aggregated cart result; `total` is already net of `discount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub total: Decimal,
    pub discount: Decimal,
}

impl CartTotals {
    pub const ZERO: CartTotals = CartTotals {
        total: Decimal::ZERO,
        discount: Decimal::ZERO,
    };
}

impl<'a> Cart<'a> {
    pub fn new(items: &'a [LineItem], currency: Currency, rate: ExchangeRate) -> Self {
        Cart {
            items,
            currency,
            rate,
        }
    }

    /// Computes the cart total and discount, both rounded to 2 decimals.
    ///
    /// ## Pricing Rules
    /// - `gift`: never added, selected or not.
    /// - `cityTax`: needs `personCount > 0` and `dayCount > 0`; the raw
    ///   `persons × days × unitPrice` value is treated as EUR-denominated
    ///   (the seeded city tax is priced in EUR), so a CZK cart multiplies by
    ///   the rate and a EUR cart adds it as-is.
    /// - `extraPerson`: same precondition, but the raw value is treated as
    ///   CZK-denominated, so a EUR cart divides by the rate. The direction
    ///   is deliberately the mirror of `cityTax`; historical receipts were
    ///   priced this way and recomputing them must give the same totals.
    /// - `manual`: needs `amount > 0`; cross-currency amounts are converted
    ///   at 2-decimal precision in both directions (the generic converter's
    ///   whole-crown convention does not apply here).
    /// - `standard`: needs `quantity > 0`; the unit price is converted with
    ///   [`ExchangeRate::convert`] (including its rounding), then
    ///   multiplied. `discountPerUnit × quantity` accumulates into the
    ///   discount bucket with no currency conversion; the discount is
    ///   whatever mix of native currencies the discounted items carry.
    ///
    /// Negative counts or amounts cannot be represented here (unsigned
    /// counts, boundary-clamped amounts), so the loop only ever checks for
    /// zero. An empty cart yields `CartTotals::ZERO`; the total is not
    /// clamped and goes negative when discounts exceed the sum.
    pub fn totals(&self) -> CartTotals {
        let mut sum = Decimal::ZERO;
        let mut discount = Decimal::ZERO;
        let rate = self.rate.value();

        for item in self.items {
            match &item.kind {
                ItemKind::Gift { .. } => {}
                ItemKind::CityTax {
                    person_count,
                    day_count,
                } => {
                    if *person_count > 0 && *day_count > 0 {
                        let raw = Decimal::from(*person_count)
                            * Decimal::from(*day_count)
                            * item.unit_price;
                        sum += match self.currency {
                            Currency::Eur => raw,
                            Currency::Czk => raw * rate,
                        };
                    }
                }
                ItemKind::ExtraPerson {
                    person_count,
                    day_count,
                } => {
                    if *person_count > 0 && *day_count > 0 {
                        let raw = Decimal::from(*person_count)
                            * Decimal::from(*day_count)
                            * item.unit_price;
                        sum += match self.currency {
                            Currency::Eur => raw / rate,
                            Currency::Czk => raw,
                        };
                    }
                }
                ItemKind::Manual { amount } => {
                    if *amount > Decimal::ZERO {
                        sum += if item.currency == self.currency {
                            *amount
                        } else {
                            match self.currency {
                                Currency::Eur => round2(*amount / rate),
                                Currency::Czk => round2(*amount * rate),
                            }
                        };
                    }
                }
                ItemKind::Standard { quantity } => {
                    if *quantity > 0 {
                        let unit =
                            self.rate
                                .convert(item.unit_price, item.currency, self.currency);
                        sum += unit * Decimal::from(*quantity);

                        if let Some(per_unit) = item.discount_per_unit {
                            if per_unit > Decimal::ZERO {
                                discount += per_unit * Decimal::from(*quantity);
                            }
                        }
                    }
                }
            }
        }

        let discount = round2(discount);
        CartTotals {
            total: round2(sum) - discount,
            discount,
        }
    }

    /// True when at least one item would be billed.
    ///
    /// Selected gifts do not count; a receipt needs a real charge.
    pub fn has_charges(&self) -> bool {
        self.items.iter().any(LineItem::contributes)
    }
}

// =============================================================================
// Reset
// =============================================================================

/// Returns a copy of `items` with every transient input payload cleared.
///
/// Catalog fields survive untouched; the operation is pure and idempotent.
pub fn reset_cart(items: &[LineItem]) -> Vec<LineItem> {
    items.iter().map(LineItem::cleared).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};
    use rust_decimal_macros::dec;

    fn rate(value: Decimal) -> ExchangeRate {
        ExchangeRate::new(value).unwrap()
    }

    fn beer(quantity: u32) -> LineItem {
        let mut item = LineItem::standard(
            Category::AlcoholicDrinks,
            "Budvar 10° 0.5 l",
            dec!(50),
            Currency::Czk,
        );
        item.kind = ItemKind::Standard { quantity };
        item
    }

    fn city_tax(persons: u32, days: u32) -> LineItem {
        let mut item = LineItem::city_tax(Category::Fees, "City tax", dec!(2), Currency::Eur);
        item.kind = ItemKind::CityTax {
            person_count: persons,
            day_count: days,
        };
        item
    }

    fn extra_person(persons: u32, days: u32) -> LineItem {
        let mut item =
            LineItem::extra_person(Category::Fees, "Extra person", dec!(1000), Currency::Czk);
        item.kind = ItemKind::ExtraPerson {
            person_count: persons,
            day_count: days,
        };
        item
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let totals = Cart::new(&[], Currency::Czk, rate(dec!(25))).totals();
        assert_eq!(totals, CartTotals::ZERO);
    }

    #[test]
    fn test_untouched_catalog_totals_zero() {
        let catalog = Catalog::seed();
        let cart = Cart::new(catalog.items(), Currency::Czk, rate(dec!(25)));
        assert_eq!(cart.totals(), CartTotals::ZERO);
        assert!(!cart.has_charges());
    }

    #[test]
    fn test_standard_item_in_native_currency() {
        let items = [beer(3)];
        let totals = Cart::new(&items, Currency::Czk, rate(dec!(25))).totals();
        assert_eq!(totals.total, dec!(150));
        assert_eq!(totals.discount, dec!(0));
    }

    #[test]
    fn test_standard_item_with_discount() {
        let items = [beer(3).with_discount(dec!(5))];
        let totals = Cart::new(&items, Currency::Czk, rate(dec!(25))).totals();
        assert_eq!(totals.discount, dec!(15));
        assert_eq!(totals.total, dec!(135));
    }

    #[test]
    fn test_standard_item_converts_unit_price_before_multiplying() {
        // round2(100 / 24) = 4.17 per unit, then × 2
        let mut whisky = LineItem::standard(
            Category::AlcoholicDrinks,
            "Jack Daniels & Cola 0.33 l",
            dec!(100),
            Currency::Czk,
        );
        whisky.kind = ItemKind::Standard { quantity: 2 };

        let items = [whisky];
        let totals = Cart::new(&items, Currency::Eur, rate(dec!(24))).totals();
        assert_eq!(totals.total, dec!(8.34));
    }

    #[test]
    fn test_standard_eur_item_in_czk_cart_rounds_to_whole_crowns() {
        let mut gas =
            LineItem::standard(Category::Services, "Grill gas", dec!(20), Currency::Eur);
        gas.kind = ItemKind::Standard { quantity: 1 };

        let items = [gas];
        let totals = Cart::new(&items, Currency::Czk, rate(dec!(24.7))).totals();
        // round0(20 * 24.7) = 494
        assert_eq!(totals.total, dec!(494));
    }

    #[test]
    fn test_city_tax_raw_value_is_euro_denominated() {
        let items = [city_tax(2, 3)];

        let czk = Cart::new(&items, Currency::Czk, rate(dec!(25))).totals();
        assert_eq!(czk.total, dec!(300));

        let eur = Cart::new(&items, Currency::Eur, rate(dec!(25))).totals();
        assert_eq!(eur.total, dec!(12));
    }

    #[test]
    fn test_extra_person_raw_value_is_crown_denominated() {
        let items = [extra_person(1, 2)];

        let eur = Cart::new(&items, Currency::Eur, rate(dec!(25))).totals();
        assert_eq!(eur.total, dec!(80));

        let czk = Cart::new(&items, Currency::Czk, rate(dec!(25))).totals();
        assert_eq!(czk.total, dec!(2000));
    }

    #[test]
    fn test_per_day_items_need_both_counts() {
        let items = [city_tax(2, 0), extra_person(0, 3)];
        let totals = Cart::new(&items, Currency::Czk, rate(dec!(25))).totals();
        assert_eq!(totals, CartTotals::ZERO);
    }

    #[test]
    fn test_manual_item_same_currency() {
        let mut wellness =
            LineItem::manual(Category::Services, "Wellness", dec!(0), Currency::Czk);
        wellness.kind = ItemKind::Manual {
            amount: dec!(750.5),
        };

        let items = [wellness];
        let totals = Cart::new(&items, Currency::Czk, rate(dec!(25))).totals();
        assert_eq!(totals.total, dec!(750.5));
    }

    #[test]
    fn test_manual_item_converts_at_two_decimals_both_ways() {
        let mut massage =
            LineItem::manual(Category::Services, "Massage", dec!(0), Currency::Eur);
        massage.kind = ItemKind::Manual { amount: dec!(10) };

        // 10 EUR × 24.55 = 245.5 CZK, kept at 2 decimals rather than the
        // whole-crown convention of the generic converter
        let items = [massage];
        let totals = Cart::new(&items, Currency::Czk, rate(dec!(24.55))).totals();
        assert_eq!(totals.total, dec!(245.5));

        let mut wellness =
            LineItem::manual(Category::Services, "Wellness", dec!(0), Currency::Czk);
        wellness.kind = ItemKind::Manual { amount: dec!(100) };

        let items = [wellness];
        let totals = Cart::new(&items, Currency::Eur, rate(dec!(24))).totals();
        assert_eq!(totals.total, dec!(4.17));
    }

    #[test]
    fn test_gifts_never_add_to_totals() {
        let mut selected = LineItem::gift("Welcome Prosecco");
        selected.kind = ItemKind::Gift { selected: true };
        let unselected = LineItem::gift("Fruit basket");

        let items = [selected, unselected];
        let cart = Cart::new(&items, Currency::Czk, rate(dec!(25)));
        assert_eq!(cart.totals(), CartTotals::ZERO);
        assert!(!cart.has_charges());
    }

    #[test]
    fn test_discount_is_not_converted() {
        // EUR item in a CZK cart: the sum converts, the discount does not
        let mut gas =
            LineItem::standard(Category::Services, "Grill gas", dec!(20), Currency::Eur)
                .with_discount(dec!(5));
        gas.kind = ItemKind::Standard { quantity: 2 };

        let items = [gas];
        let totals = Cart::new(&items, Currency::Czk, rate(dec!(25))).totals();
        assert_eq!(totals.discount, dec!(10));
        assert_eq!(totals.total, dec!(990));
    }

    #[test]
    fn test_discount_can_exceed_sum() {
        let items = [beer(1).with_discount(dec!(100))];
        let totals = Cart::new(&items, Currency::Czk, rate(dec!(25))).totals();
        assert_eq!(totals.total, dec!(-50));
        assert_eq!(totals.discount, dec!(100));
    }

    #[test]
    fn test_mixed_cart() {
        let mut wellness =
            LineItem::manual(Category::Services, "Wellness", dec!(0), Currency::Czk);
        wellness.kind = ItemKind::Manual { amount: dec!(500) };
        let mut gift = LineItem::gift("Welcome Prosecco");
        gift.kind = ItemKind::Gift { selected: true };

        let items = [beer(3), city_tax(2, 3), wellness, gift];
        let totals = Cart::new(&items, Currency::Czk, rate(dec!(25))).totals();
        // 150 + 300 + 500
        assert_eq!(totals.total, dec!(950));
        assert_eq!(totals.discount, dec!(0));
    }

    #[test]
    fn test_reset_cart_is_pure_and_idempotent() {
        let items = vec![beer(3), city_tax(2, 3), extra_person(1, 2)];

        let once = reset_cart(&items);
        assert!(once.iter().all(|item| !item.contributes()));
        // Input is untouched
        assert!(items.iter().all(|item| item.contributes()));
        // Catalog fields survive
        assert_eq!(once[0].name, "Budvar 10° 0.5 l");
        assert_eq!(once[0].unit_price, dec!(50));

        let twice = reset_cart(&once);
        assert_eq!(twice, once);
    }
}

// =============================================================================
// Property Tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::catalog::Category;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn priced_item(price_cents: i64, quantity: u32) -> LineItem {
        let mut item = LineItem::standard(
            Category::Other,
            "Item",
            Decimal::new(price_cents, 2),
            Currency::Czk,
        );
        item.kind = ItemKind::Standard { quantity };
        item
    }

    proptest! {
        /// Totals do not depend on item order.
        #[test]
        fn prop_totals_are_order_independent(
            entries in proptest::collection::vec((0i64..100_000, 0u32..50), 0..8)
        ) {
            let mut items: Vec<LineItem> = entries
                .iter()
                .map(|(price, quantity)| priced_item(*price, *quantity))
                .collect();
            let rate = ExchangeRate::new(dec!(24.5)).unwrap();

            let forward = Cart::new(&items, Currency::Eur, rate).totals();
            items.reverse();
            let backward = Cart::new(&items, Currency::Eur, rate).totals();

            prop_assert_eq!(forward, backward);
        }

        /// Gift selection flags never change the totals.
        #[test]
        fn prop_gift_selection_is_priced_as_nothing(selections in proptest::collection::vec(any::<bool>(), 1..6)) {
            let mut items = vec![priced_item(5_000, 2)];
            for (i, selected) in selections.iter().enumerate() {
                let mut gift = LineItem::gift(format!("Gift {i}"));
                gift.kind = ItemKind::Gift { selected: *selected };
                items.push(gift);
            }
            let rate = ExchangeRate::default();

            let with_gifts = Cart::new(&items, Currency::Czk, rate).totals();
            let without = Cart::new(&items[..1], Currency::Czk, rate).totals();
            prop_assert_eq!(with_gifts, without);
        }

        /// Clearing is idempotent for any random overlay.
        #[test]
        fn prop_reset_is_idempotent(quantities in proptest::collection::vec(0u32..100, 1..10)) {
            let items: Vec<LineItem> = quantities
                .iter()
                .map(|q| priced_item(10_000, *q))
                .collect();

            let once = reset_cart(&items);
            let twice = reset_cart(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
