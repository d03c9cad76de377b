//! Parsers for single answers typed at the console.
//!
//! Each parser takes the raw line and either returns the typed value or an
//! [`AssetError::InvalidInput`] whose message is shown before asking again.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use strum::IntoEnumIterator;

use crate::offices::OfficeTable;
use crate::types::{AssetError, AssetId, AssetKind};

/// Textual format of purchase dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The zero date. Entering it means "purchased today".
pub const DATE_SENTINEL: &str = "0001-01-01";

pub fn parse_kind(input: &str) -> Result<AssetKind, AssetError> {
    AssetKind::from_str(input.trim()).map_err(|_| {
        let kinds: Vec<String> = AssetKind::iter().map(|k| k.to_string()).collect();
        AssetError::invalid("type", format!("expected one of {}", kinds.join(", ")))
    })
}

pub fn parse_name(input: &str) -> Result<String, AssetError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(AssetError::invalid("name", "must not be empty"));
    }
    Ok(name.to_string())
}

/// Resolves an office name and returns its canonical spelling.
pub fn parse_office(input: &str, offices: &OfficeTable) -> Result<String, AssetError> {
    offices.find(input).map(|o| o.name.clone()).ok_or_else(|| {
        let known: Vec<&str> = offices.names().collect();
        AssetError::invalid("office", format!("expected one of {}", known.join(", ")))
    })
}

pub fn parse_price(input: &str) -> Result<Decimal, AssetError> {
    let price = Decimal::from_str(input.trim())
        .map_err(|_| AssetError::invalid("price", format!("'{}' is not a number", input.trim())))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AssetError::invalid("price", "must not be negative"));
    }
    Ok(price.normalize())
}

pub fn parse_purchase_date(input: &str, today: NaiveDate) -> Result<NaiveDate, AssetError> {
    let input = input.trim();
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| AssetError::invalid("purchase date", format!("'{}' is not a YYYY-MM-DD date", input)))?;

    if (date.year(), date.month(), date.day()) == (1, 1, 1) {
        return Ok(today);
    }
    Ok(date)
}

pub fn parse_asset_id(input: &str) -> Result<AssetId, AssetError> {
    match input.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(AssetId(id)),
        _ => Err(AssetError::invalid("id", format!("'{}' is not a positive number", input.trim()))),
    }
}
