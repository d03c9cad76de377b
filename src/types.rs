use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Store-assigned identifier of an asset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub i64);

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of physical item being tracked.
///
/// Parsing is case-insensitive, so `"phone"`, `"PHONE"` and `"Phone"` all
/// resolve to [`AssetKind::Phone`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum AssetKind {
    Phone,
    Laptop,
}

/// An asset that has not been stored yet, so it carries no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAsset {
    pub kind: AssetKind,
    pub name: String,
    /// Canonical office name, as spelled in the office table.
    pub office: String,
    /// Price in the reference currency.
    pub price: Decimal,
    pub purchase_date: NaiveDate,
}

impl NewAsset {
    pub fn new(
        kind: AssetKind,
        name: impl Into<String>,
        office: impl Into<String>,
        price: Decimal,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            office: office.into(),
            price,
            purchase_date,
        }
    }

    /// Attaches the id the store assigned on creation.
    pub fn with_id(self, id: AssetId) -> Asset {
        Asset {
            id,
            kind: self.kind,
            name: self.name,
            office: self.office,
            price: self.price,
            purchase_date: self.purchase_date,
        }
    }
}

/// A stored asset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub kind: AssetKind,
    pub name: String,
    pub office: String,
    pub price: Decimal,
    pub purchase_date: NaiveDate,
}

impl Asset {
    /// Drops the id, keeping every other field.
    pub fn to_new(&self) -> NewAsset {
        NewAsset {
            kind: self.kind,
            name: self.name.clone(),
            office: self.office.clone(),
            price: self.price,
            purchase_date: self.purchase_date,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Asset {0} not found.")]
    NotFound(AssetId),

    #[error("Office '{0}' has no currency configured")]
    UnknownOffice(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Stored record has an unreadable {field}: '{value}'")]
    CorruptRecord { field: &'static str, value: String },

    #[error("Input closed")]
    InputClosed,

    #[error("Cancelled.")]
    Cancelled,

    #[error("Console error: {0}")]
    Console(String),
}

impl AssetError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AssetError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the error only concerns a single user answer and can be
    /// recovered from by asking again.
    pub fn is_recoverable_input(&self) -> bool {
        matches!(self, AssetError::InvalidInput { .. })
    }
}
