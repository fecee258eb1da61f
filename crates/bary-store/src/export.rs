//! # CSV Export
//!
//! Spreadsheet-friendly exports of a single receipt and of the whole
//! history, built from receipt snapshots only.
//!
//! ## Format
//!
//! Both exports share one dialect, chosen so Czech Excel opens them without
//! an import wizard:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UTF-8 with BOM        diacritics survive the double-click open         │
//! │  ';' delimiter         ',' is the decimal separator in cs-CZ locales    │
//! │  every field quoted    quotes inside fields doubled                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are formatted as `<amount> <symbol>` with insignificant trailing
//! zeros trimmed, matching the on-screen rendering.

use csv::{QuoteStyle, Writer, WriterBuilder};
use rust_decimal::Decimal;

use bary_core::{format_amount, Currency, ItemKind, Receipt, ReceiptRow, RowDetail};

use crate::error::StoreResult;

/// Suggested download name for [`receipt_csv`].
pub const RECEIPT_CSV_FILE_NAME: &str = "receipt.csv";

/// Suggested download name for [`history_csv`].
pub const HISTORY_CSV_FILE_NAME: &str = "receipt-history.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// =============================================================================
// Receipt Export
// =============================================================================

/// Renders one receipt as CSV bytes.
///
/// Header `Item;Tally;Note;Price`, one row per receipt row, then a blank
/// spacer row, a `Discount` row when a discount was applied, and the
/// `Total` row.
pub fn receipt_csv(receipt: &Receipt) -> StoreResult<Vec<u8>> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut wtr = csv_writer(&mut buf);
        wtr.write_record(["Item", "Tally", "Note", "Price"])?;

        for row in receipt.rows() {
            wtr.write_record([
                label_cell(&row),
                tally_cell(&row),
                row.note.clone().unwrap_or_default(),
                price_cell(&row, receipt.currency),
            ])?;
        }

        wtr.write_record([""; 4])?;
        if receipt.discount > Decimal::ZERO {
            wtr.write_record([
                "Discount".to_string(),
                String::new(),
                String::new(),
                format!("-{}", format_amount(receipt.discount, receipt.currency)),
            ])?;
        }
        wtr.write_record([
            "Total".to_string(),
            String::new(),
            String::new(),
            format_amount(receipt.total, receipt.currency),
        ])?;
        wtr.flush()?;
    }
    Ok(buf)
}

// =============================================================================
// History Export
// =============================================================================

/// Renders the receipt history as CSV bytes, one row per receipt.
///
/// Header `Date;Guest;Reservation;Total;Currency;Items`; the `Items` column
/// is a comma-joined summary of the billed items.
pub fn history_csv(history: &[Receipt]) -> StoreResult<Vec<u8>> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut wtr = csv_writer(&mut buf);
        wtr.write_record(["Date", "Guest", "Reservation", "Total", "Currency", "Items"])?;

        for receipt in history {
            wtr.write_record([
                receipt.date_label(),
                receipt.guest_name.clone().unwrap_or_default(),
                receipt.reservation.clone().unwrap_or_default(),
                receipt.total.normalize().to_string(),
                receipt.currency.code().to_string(),
                items_summary(receipt),
            ])?;
        }
        wtr.flush()?;
    }
    Ok(buf)
}

// =============================================================================
// Cell Rendering
// =============================================================================

fn csv_writer(buf: &mut Vec<u8>) -> Writer<&mut Vec<u8>> {
    WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .from_writer(buf)
}

fn label_cell(row: &ReceiptRow) -> String {
    match row.detail {
        RowDetail::Gift => format!("{} (gift)", row.label),
        _ => row.label.clone(),
    }
}

fn tally_cell(row: &ReceiptRow) -> String {
    match row.detail {
        RowDetail::Count { count } => format!("{count}×"),
        RowDetail::PersonDays { persons, days } => format!("{persons} pers. × {days} days"),
        // Manual amounts show in the price column; gifts have no tally
        RowDetail::Amount { .. } | RowDetail::Gift => String::new(),
    }
}

fn price_cell(row: &ReceiptRow, currency: Currency) -> String {
    let mut cell = match row.price {
        Some(price) => format_amount(price, currency),
        None => return String::new(),
    };
    if let Some(per_unit) = row.discount_per_unit {
        // The per-unit discount is echoed as entered, in the receipt currency
        cell.push_str(&format!(
            " (discount: -{})",
            format_amount(per_unit, currency)
        ));
    }
    cell
}

fn items_summary(receipt: &Receipt) -> String {
    receipt
        .items
        .iter()
        .map(|item| match &item.kind {
            ItemKind::Gift { .. } => format!("{} (gift)", item.name),
            ItemKind::Standard { quantity } => format!("{} ({quantity}×)", item.name),
            _ => item.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bary_core::{Cart, Category, ExchangeRate, LineItem, Settings};
    use rust_decimal_macros::dec;

    fn czk_receipt() -> Receipt {
        let mut beer = LineItem::standard(
            Category::AlcoholicDrinks,
            "Budvar 10° 0.5 l",
            dec!(50),
            Currency::Czk,
        )
        .with_discount(dec!(5));
        beer.kind = ItemKind::Standard { quantity: 3 };

        let mut tax = LineItem::city_tax(Category::Fees, "City tax", dec!(2), Currency::Eur);
        tax.kind = ItemKind::CityTax {
            person_count: 2,
            day_count: 3,
        };

        let mut massage = LineItem::manual(Category::Services, "Massage", dec!(0), Currency::Eur)
            .with_note("relaxing");
        massage.kind = ItemKind::Manual { amount: dec!(10) };

        let mut gift = LineItem::gift("Welcome Prosecco");
        gift.kind = ItemKind::Gift { selected: true };

        let items = [beer, tax, massage, gift];
        let cart = Cart::new(&items, Currency::Czk, ExchangeRate::new(dec!(25)).unwrap());
        Receipt::finalize(&cart, &Settings::default()).unwrap()
    }

    fn eur_receipt() -> Receipt {
        let mut massage = LineItem::manual(Category::Services, "Massage", dec!(0), Currency::Eur);
        massage.kind = ItemKind::Manual { amount: dec!(10) };

        let items = [massage];
        let cart = Cart::new(&items, Currency::Eur, ExchangeRate::new(dec!(25)).unwrap());
        Receipt::finalize(&cart, &Settings::default()).unwrap()
    }

    fn text_of(bytes: &[u8]) -> String {
        assert!(bytes.starts_with(UTF8_BOM), "export must carry a UTF-8 BOM");
        String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap()
    }

    #[test]
    fn test_receipt_csv_rows() {
        let bytes = receipt_csv(&czk_receipt()).unwrap();
        let text = text_of(&bytes);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], r#""Item";"Tally";"Note";"Price""#);
        assert_eq!(
            lines[1],
            r#""Budvar 10° 0.5 l";"3×";"";"50 Kč (discount: -5 Kč)""#
        );
        assert_eq!(lines[2], r#""City tax";"2 pers. × 3 days";"";"300 Kč""#);
        assert_eq!(lines[3], r#""Massage";"";"relaxing";"250 Kč""#);
        assert_eq!(lines[4], r#""Welcome Prosecco (gift)";"";"";"""#);
        assert_eq!(lines[5], r#""";"";"";"""#);
        assert_eq!(lines[6], r#""Discount";"";"";"-15 Kč""#);
        assert_eq!(lines[7], r#""Total";"";"";"685 Kč""#);
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_discount_row_only_when_discounted() {
        let bytes = receipt_csv(&eur_receipt()).unwrap();
        let text = text_of(&bytes);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], r#""Massage";"";"";"10 €""#);
        assert_eq!(lines[3], r#""Total";"";"";"10 €""#);
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_quotes_in_names_are_doubled() {
        let mut sekt = LineItem::standard(
            Category::AlcoholicDrinks,
            "Sekt \"Bohemia\" 0.7 l",
            dec!(219),
            Currency::Czk,
        );
        sekt.kind = ItemKind::Standard { quantity: 1 };

        let items = [sekt];
        let cart = Cart::new(&items, Currency::Czk, ExchangeRate::default());
        let receipt = Receipt::finalize(&cart, &Settings::default()).unwrap();

        let bytes = receipt_csv(&receipt).unwrap();
        assert!(text_of(&bytes).contains(r#""Sekt ""Bohemia"" 0.7 l""#));
    }

    #[test]
    fn test_history_csv_rows() {
        let mut first = czk_receipt();
        first.created_at = "2025-03-07T14:05:00Z".parse().unwrap();
        first.guest_name = Some("Nováková".to_string());
        first.reservation = Some("RES-1042".to_string());

        let mut second = eur_receipt();
        second.created_at = "2025-03-05T09:00:00Z".parse().unwrap();

        let bytes = history_csv(&[first, second]).unwrap();
        let text = text_of(&bytes);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            r#""Date";"Guest";"Reservation";"Total";"Currency";"Items""#
        );
        assert_eq!(
            lines[1],
            r#""07.03.2025";"Nováková";"RES-1042";"685";"CZK";"Budvar 10° 0.5 l (3×), City tax, Massage, Welcome Prosecco (gift)""#
        );
        assert_eq!(lines[2], r#""05.03.2025";"";"";"10";"EUR";"Massage""#);
    }

    #[test]
    fn test_empty_history_is_header_only() {
        let bytes = history_csv(&[]).unwrap();
        let text = text_of(&bytes);
        assert_eq!(text.lines().count(), 1);
    }
}
