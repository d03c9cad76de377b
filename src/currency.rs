//! Conversion of stored reference-currency prices into each office's local
//! currency.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::offices::OfficeTable;
use crate::types::AssetError;

/// A price expressed in an office's local currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPrice {
    pub amount: Decimal,
    pub currency: String,
}

impl std::fmt::Display for LocalPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

/// Rounds to 2 decimal places, halves away from zero.
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts `price` into the local currency of `office`.
///
/// # Errors
/// Returns [`AssetError::UnknownOffice`] when the office is not in the table.
/// There is no fallback rate.
pub fn convert_price(offices: &OfficeTable, office: &str, price: Decimal) -> Result<LocalPrice, AssetError> {
    let entry = offices
        .find(office)
        .ok_or_else(|| AssetError::UnknownOffice(office.to_string()))?;

    let amount = price
        .checked_mul(entry.rate)
        .ok_or_else(|| AssetError::Configuration(format!("price {} overflows at rate {}", price, entry.rate)))?;

    Ok(LocalPrice {
        amount: round_currency(amount),
        currency: entry.currency.clone(),
    })
}
