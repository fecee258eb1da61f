//! # Catalog
//!
//! The fixed category set, the seeded item list, and the edit operations a
//! host may perform on the working catalog.
//!
//! ## Catalog vs Cart
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (persisted)                Cart (per-aggregation snapshot)     │
//! │                                                                         │
//! │  ┌──────────────────────────┐                                           │
//! │  │ seeded items (fixed)     │      borrow items + display currency      │
//! │  │ user items               │ ───► + exchange rate ───► totals          │
//! │  │ gifts                    │                                           │
//! │  │  + transient input       │      reset() clears the transient input   │
//! │  └──────────────────────────┘      back to the plain catalog            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Seeded items are `fixed`: they can be hidden or annotated but never
//! renamed or removed, since the billing rules (city tax, extra person)
//! hang off them.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::reset_cart;
use crate::error::{CoreError, CoreResult};
use crate::item::LineItem;
use crate::money::Currency;
use crate::validation::{validate_item_name, validate_non_negative};

// =============================================================================
// Category
// =============================================================================

/// Display grouping for catalog items, in fixed presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Services,
    AlcoholicDrinks,
    NonAlcoholicDrinks,
    Other,
    Breakfast,
    Fees,
    Gifts,
}

impl Category {
    /// Every category, in presentation order.
    pub const ALL: [Category; 7] = [
        Category::Services,
        Category::AlcoholicDrinks,
        Category::NonAlcoholicDrinks,
        Category::Other,
        Category::Breakfast,
        Category::Fees,
        Category::Gifts,
    ];

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Services => "Services",
            Category::AlcoholicDrinks => "Alcoholic Drinks",
            Category::NonAlcoholicDrinks => "Non-alcoholic Drinks",
            Category::Other => "Other",
            Category::Breakfast => "Breakfast",
            Category::Fees => "Fees",
            Category::Gifts => "Gifts",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The working item list: seed data plus user additions, with any transient
/// billing input currently overlaid.
///
/// Serialized as a bare item array, which is also the persisted record
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<LineItem>,
}

impl Catalog {
    /// Wraps an existing item list (e.g. one loaded from a record).
    pub fn new(items: Vec<LineItem>) -> Self {
        Catalog { items }
    }

    /// The seeded default catalog.
    ///
    /// Every entry is `fixed`; the Gifts category starts empty and fills up
    /// through [`Catalog::add_gift`].
    pub fn seed() -> Self {
        use Category::*;
        use Currency::*;

        Catalog {
            items: vec![
                LineItem::standard(Services, "Grill gas", Decimal::from(20), Eur).seeded(),
                LineItem::manual(Services, "Wellness", Decimal::ZERO, Czk).seeded(),
                LineItem::standard(AlcoholicDrinks, "Prosecco", Decimal::from(390), Czk).seeded(),
                LineItem::standard(
                    AlcoholicDrinks,
                    "Jack Daniels & Cola 0.33 l",
                    Decimal::from(100),
                    Czk,
                )
                .seeded(),
                LineItem::standard(
                    AlcoholicDrinks,
                    "Beefeater Gin & Tonic 0.25 l",
                    Decimal::from(75),
                    Czk,
                )
                .seeded(),
                LineItem::standard(AlcoholicDrinks, "Budvar 10° 0.5 l", Decimal::from(50), Czk)
                    .seeded(),
                LineItem::standard(NonAlcoholicDrinks, "Red Bull 0.25 l", Decimal::from(60), Czk)
                    .seeded(),
                LineItem::standard(
                    NonAlcoholicDrinks,
                    "Coca-Cola / Sprite / Fanta 0.33 l",
                    Decimal::from(30),
                    Czk,
                )
                .seeded(),
                LineItem::standard(
                    NonAlcoholicDrinks,
                    "Korunní Citrus Mix 0.33 l",
                    Decimal::from(35),
                    Czk,
                )
                .seeded(),
                LineItem::standard(
                    NonAlcoholicDrinks,
                    "Korunní Vitamin D3 0.33 l",
                    Decimal::from(35),
                    Czk,
                )
                .seeded(),
                LineItem::standard(Other, "Coffee capsule", Decimal::from(30), Czk)
                    .with_note("First 25 capsules free")
                    .seeded(),
                LineItem::standard(Breakfast, "Breakfast", Decimal::from(200), Czk).seeded(),
                LineItem::standard(Breakfast, "Fresh juice 330 ml", Decimal::from(115), Czk)
                    .seeded(),
                LineItem::city_tax(Fees, "City tax", Decimal::from(2), Eur).seeded(),
                LineItem::extra_person(Fees, "Extra person", Decimal::from(1000), Czk).seeded(),
            ],
        }
    }

    /// All items, in catalog order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Mutable access for input overlay (entering quantities, amounts,
    /// person/day counts, gift selection).
    pub fn items_mut(&mut self) -> &mut [LineItem] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items offered for billing (not hidden), in catalog order.
    pub fn visible(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| !item.hidden)
    }

    /// Visible items of one category, in catalog order.
    pub fn by_category(&self, category: Category) -> Vec<&LineItem> {
        self.visible()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Appends a user-added item after validating its fields.
    pub fn add(&mut self, item: LineItem) -> CoreResult<()> {
        validate_item_name(&item.name)?;
        validate_non_negative(item.unit_price, "unitPrice")?;
        if let Some(discount) = item.discount_per_unit {
            validate_non_negative(discount, "discountPerUnit")?;
        }
        self.items.push(item);
        Ok(())
    }

    /// Appends a gift entry with the given label.
    pub fn add_gift(&mut self, name: impl Into<String>) -> CoreResult<()> {
        let name = name.into();
        validate_item_name(&name)?;
        self.items.push(LineItem::gift(name));
        Ok(())
    }

    /// Removes a user-added item; fixed items are refused.
    pub fn remove(&mut self, index: usize) -> CoreResult<LineItem> {
        let item = self.get(index)?;
        if item.fixed {
            return Err(CoreError::FixedItem {
                name: item.name.clone(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Renames a user-added item; fixed items are refused.
    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> CoreResult<()> {
        let name = name.into();
        validate_item_name(&name)?;
        let item = self.get(index)?;
        if item.fixed {
            return Err(CoreError::FixedItem {
                name: item.name.clone(),
            });
        }
        self.items[index].name = name;
        Ok(())
    }

    /// Sets or clears an item's display note.
    pub fn set_note(&mut self, index: usize, note: Option<String>) -> CoreResult<()> {
        self.get(index)?;
        self.items[index].note = note.filter(|n| !n.trim().is_empty());
        Ok(())
    }

    /// Hides an item from billing or brings it back. Works on any item,
    /// fixed or not.
    pub fn set_hidden(&mut self, index: usize, hidden: bool) -> CoreResult<()> {
        self.get(index)?;
        self.items[index].hidden = hidden;
        Ok(())
    }

    /// Clears all transient billing input, returning the catalog to its
    /// plain state.
    pub fn reset(&mut self) {
        self.items = reset_cart(&self.items);
    }

    fn get(&self, index: usize) -> CoreResult<&LineItem> {
        self.items
            .get(index)
            .ok_or(CoreError::ItemNotFound { index })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::seed()
    }
}

impl From<Vec<LineItem>> for Catalog {
    fn from(items: Vec<LineItem>) -> Self {
        Catalog::new(items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_seed_shape() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.len(), 15);
        assert!(catalog.items().iter().all(|item| item.fixed));
        assert!(catalog.items().iter().all(|item| !item.hidden));

        // Every category except Gifts has seeded entries
        for category in Category::ALL {
            let expected = category != Category::Gifts;
            assert_eq!(
                !catalog.by_category(category).is_empty(),
                expected,
                "category {category}"
            );
        }
    }

    #[test]
    fn test_seed_fee_items() {
        let catalog = Catalog::seed();
        let fees = catalog.by_category(Category::Fees);
        assert_eq!(fees.len(), 2);

        let tax = fees.iter().find(|i| i.name == "City tax").unwrap();
        assert_eq!(tax.currency, Currency::Eur);
        assert_eq!(tax.unit_price, dec!(2));
        assert!(matches!(tax.kind, ItemKind::CityTax { .. }));

        let extra = fees.iter().find(|i| i.name == "Extra person").unwrap();
        assert_eq!(extra.currency, Currency::Czk);
        assert_eq!(extra.unit_price, dec!(1000));
        assert!(matches!(extra.kind, ItemKind::ExtraPerson { .. }));
    }

    #[test]
    fn test_add_validates_fields() {
        let mut catalog = Catalog::seed();

        let nameless = LineItem::standard(Category::Other, "   ", dec!(10), Currency::Czk);
        assert!(catalog.add(nameless).is_err());

        let negative =
            LineItem::standard(Category::Other, "Sparkler", dec!(-5), Currency::Czk);
        assert!(catalog.add(negative).is_err());

        let ok = LineItem::standard(Category::Other, "Sparkler", dec!(45), Currency::Czk);
        assert!(catalog.add(ok).is_ok());
        assert_eq!(catalog.len(), 16);
        assert!(!catalog.items().last().unwrap().fixed);
    }

    #[test]
    fn test_fixed_items_cannot_be_removed_or_renamed() {
        let mut catalog = Catalog::seed();

        assert!(matches!(
            catalog.remove(0),
            Err(CoreError::FixedItem { .. })
        ));
        assert!(matches!(
            catalog.rename(0, "Something else"),
            Err(CoreError::FixedItem { .. })
        ));
        assert!(matches!(
            catalog.remove(99),
            Err(CoreError::ItemNotFound { index: 99 })
        ));

        // User items remain editable
        catalog
            .add(LineItem::standard(
                Category::Other,
                "Sparkler",
                dec!(45),
                Currency::Czk,
            ))
            .unwrap();
        let index = catalog.len() - 1;
        catalog.rename(index, "Sparkler XL").unwrap();
        assert_eq!(catalog.items()[index].name, "Sparkler XL");
        let removed = catalog.remove(index).unwrap();
        assert_eq!(removed.name, "Sparkler XL");
    }

    #[test]
    fn test_add_gift() {
        let mut catalog = Catalog::seed();
        catalog.add_gift("Welcome Prosecco").unwrap();

        let gifts = catalog.by_category(Category::Gifts);
        assert_eq!(gifts.len(), 1);
        assert_eq!(gifts[0].name, "Welcome Prosecco");
        assert!(!gifts[0].fixed);
        assert!(gifts[0].kind.is_gift());
        assert_eq!(gifts[0].unit_price, dec!(0));
    }

    #[test]
    fn test_hidden_items_leave_billing_view() {
        let mut catalog = Catalog::seed();
        let visible_before = catalog.visible().count();

        catalog.set_hidden(0, true).unwrap();
        assert_eq!(catalog.visible().count(), visible_before - 1);
        assert_eq!(catalog.len(), 15);

        catalog.set_hidden(0, false).unwrap();
        assert_eq!(catalog.visible().count(), visible_before);
    }

    #[test]
    fn test_reset_clears_input() {
        let mut catalog = Catalog::seed();
        catalog.items_mut()[2].kind = ItemKind::Standard { quantity: 4 };
        catalog.items_mut()[13].kind = ItemKind::CityTax {
            person_count: 2,
            day_count: 3,
        };

        catalog.reset();
        assert!(catalog.items().iter().all(|item| !item.contributes()));
        assert_eq!(catalog, Catalog::seed());
    }
}
