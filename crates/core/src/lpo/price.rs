//! LPO pricing: line amount and internal vs external price comparison.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LpoError;
use crate::budget::percent_of;

fn ensure_non_negative(field: &'static str, amount: Decimal) -> Result<(), LpoError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LpoError::NegativeAmount { field, amount });
    }
    Ok(())
}

/// Returns `unit_price * quantity`.
///
/// # Errors
///
/// Returns `LpoError::NegativeAmount` if either input is negative and
/// `LpoError::AmountOverflow` if the product does not fit.
pub fn lpo_amount(unit_price: Decimal, quantity: Decimal) -> Result<Decimal, LpoError> {
    ensure_non_negative("unit_price", unit_price)?;
    ensure_non_negative("quantity", quantity)?;
    unit_price
        .checked_mul(quantity)
        .ok_or(LpoError::AmountOverflow {
            operation: "lpo amount",
        })
}

/// Comparison of the internal unit cost against a supplier quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceComparison {
    /// Internal unit cost.
    pub internal_unit_cost: Decimal,
    /// External supplier unit cost.
    pub external_unit_cost: Decimal,
    /// `external - internal`.
    pub difference: Decimal,
    /// `difference / internal * 100`, zero when the internal cost is zero.
    pub variance_percent: Decimal,
}

impl PriceComparison {
    /// Compares the two unit costs.
    ///
    /// # Errors
    ///
    /// Returns `LpoError::NegativeAmount` if either cost is negative and
    /// `LpoError::AmountOverflow` if the variance percentage does not fit.
    pub fn compare(
        internal_unit_cost: Decimal,
        external_unit_cost: Decimal,
    ) -> Result<Self, LpoError> {
        ensure_non_negative("internal_unit_cost", internal_unit_cost)?;
        ensure_non_negative("external_unit_cost", external_unit_cost)?;

        let difference = external_unit_cost
            .checked_sub(internal_unit_cost)
            .ok_or(LpoError::AmountOverflow {
                operation: "price difference",
            })?;
        let variance_percent =
            percent_of(difference, internal_unit_cost).map_err(|_| LpoError::AmountOverflow {
                operation: "variance percentage",
            })?;

        Ok(Self {
            internal_unit_cost,
            external_unit_cost,
            difference,
            variance_percent,
        })
    }

    /// True if the supplier quote is above the internal cost.
    #[must_use]
    pub fn is_external_price_higher(&self) -> bool {
        self.difference > Decimal::ZERO
    }
}
