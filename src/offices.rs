//! Office table.
//!
//! The single source of truth for which offices exist and which currency each
//! one reports in. Input validation and currency conversion both read from
//! the same [`OfficeTable`], so an office accepted at the prompt can always be
//! converted in the report.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::AssetError;

/// A company location and its local display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub name: String,
    /// ISO 4217 code shown next to converted prices.
    pub currency: String,
    /// Multiplier from the reference currency to the local one.
    pub rate: Decimal,
}

impl Office {
    pub fn new(name: impl Into<String>, currency: impl Into<String>, rate: Decimal) -> Self {
        Self {
            name: name.into(),
            currency: currency.into(),
            rate,
        }
    }
}

/// Validated list of offices, looked up case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OfficeTable {
    offices: Vec<Office>,
}

impl Default for OfficeTable {
    fn default() -> Self {
        Self {
            offices: vec![
                Office::new("Miami", "USD", dec!(1.00)),
                Office::new("Madrid", "EUR", dec!(0.86)),
                Office::new("Stockholm", "SEK", dec!(10.50)),
            ],
        }
    }
}

impl OfficeTable {
    /// Builds a table, rejecting empty lists, duplicate names (ignoring case),
    /// blank currency codes and non-positive rates.
    pub fn new(offices: Vec<Office>) -> Result<Self, AssetError> {
        if offices.is_empty() {
            return Err(AssetError::Configuration(
                "at least one office must be configured".to_string(),
            ));
        }

        for (i, office) in offices.iter().enumerate() {
            let name = office.name.trim();
            if name.is_empty() {
                return Err(AssetError::Configuration("office name must not be empty".to_string()));
            }
            if office.currency.trim().is_empty() {
                return Err(AssetError::Configuration(format!(
                    "office '{}' has no currency code",
                    name
                )));
            }
            if office.rate <= Decimal::ZERO {
                return Err(AssetError::Configuration(format!(
                    "office '{}' must have a positive rate, got {}",
                    name, office.rate
                )));
            }
            if offices[..i].iter().any(|o| o.name.trim().eq_ignore_ascii_case(name)) {
                return Err(AssetError::Configuration(format!("office '{}' is listed twice", name)));
            }
        }

        let offices = offices
            .into_iter()
            .map(|o| Office::new(o.name.trim(), o.currency.trim().to_uppercase(), o.rate))
            .collect();

        Ok(Self { offices })
    }

    /// Finds an office by name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&Office> {
        let name = name.trim();
        self.offices.iter().find(|o| o.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.offices.iter().map(|o| o.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Office> {
        self.offices.iter()
    }

    pub fn len(&self) -> usize {
        self.offices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offices.is_empty()
    }
}

impl<'de> Deserialize<'de> for OfficeTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let offices = Vec::<Office>::deserialize(deserializer)?;
        OfficeTable::new(offices).map_err(serde::de::Error::custom)
    }
}
