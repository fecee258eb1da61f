//! # Input Validation
//!
//! Boundary checks and input normalization used before domain values are
//! constructed. The pricing engine itself assumes validated input (positive
//! rates, non-negative counts and amounts); these helpers are where hosts
//! enforce that.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::round2;
use crate::MAX_ITEM_NAME_LEN;

/// Convenience alias for validation outcomes.
pub type ValidationResult = Result<(), ValidationError>;

/// Validates an item or gift label: non-blank, at most
/// [`MAX_ITEM_NAME_LEN`] characters.
pub fn validate_item_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates a monetary field that must not be negative (prices,
/// discounts).
pub fn validate_non_negative(value: Decimal, field: &str) -> ValidationResult {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Clamps raw count input (quantities, person/day counts) into the
/// non-negative range the engine works with.
pub fn normalize_count(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

/// Clamps raw amount input to non-negative and rounds it to 2 decimals,
/// the precision manual amounts are entered at.
pub fn normalize_amount(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else {
        round2(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
