use serde::{Deserialize, Serialize};

use crate::offices::OfficeTable;
use crate::types::AssetError;

/// Storage location used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:assets.db?mode=rwc";

/// Runtime configuration of the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub database_url: String,
    pub offices: OfficeTable,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            offices: OfficeTable::default(),
        }
    }
}

impl TrackerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    pub fn with_offices(mut self, offices: OfficeTable) -> Self {
        self.offices = offices;
        self
    }

    /// Validates the configuration for logical consistency.
    pub fn validate(&self) -> Result<(), AssetError> {
        if !self.database_url.starts_with("sqlite:") {
            return Err(AssetError::Configuration(format!(
                "database URL must start with 'sqlite:', got '{}'",
                self.database_url
            )));
        }
        if self.offices.is_empty() {
            return Err(AssetError::Configuration("no offices configured".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offices::Office;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_is_valid() {
        let config = TrackerConfig::default();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_sqlite_url() {
        let config = TrackerConfig::new().with_database_url("postgres://localhost/assets");
        assert!(matches!(config.validate(), Err(AssetError::Configuration(_))));
    }

    #[test]
    fn test_offices_deserialize_through_validation() {
        #[derive(Deserialize)]
        struct Wrapper {
            offices: OfficeTable,
        }

        let ok: Wrapper = toml::from_str(
            r#"
            [[offices]]
            name = "Oslo"
            currency = "NOK"
            rate = "10.7"
            "#,
        )
        .unwrap();
        let config = TrackerConfig::new().with_offices(ok.offices);
        assert_eq!(config.offices.find("oslo"), Some(&Office::new("Oslo", "NOK", dec!(10.7))));

        let dup = toml::from_str::<Wrapper>(
            r#"
            [[offices]]
            name = "Oslo"
            currency = "NOK"
            rate = "10.7"

            [[offices]]
            name = "oslo"
            currency = "NOK"
            rate = "10.7"
            "#,
        );
        assert!(dup.is_err());
    }
}
