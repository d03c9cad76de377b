//! Prelude module for the asset tracker
//!
//! This module re-exports commonly used structs, traits, and types to allow
//! for easier usage of the library.
//!
//! # Usage
//!
//! ```rust
//! use asset_tracker::prelude::*;
//! ```

// Core exports
pub use crate::config::TrackerConfig;
pub use crate::offices::{Office, OfficeTable};
pub use crate::types::{Asset, AssetError, AssetId, AssetKind, NewAsset};

// Interaction and reporting
pub use crate::console::{Console, ScriptedConsole};
pub use crate::factory::AssetFactory;
pub use crate::report::{ReportRow, build_report, render_report};
pub use crate::session::{MenuChoice, Session};

// Storage
pub use crate::store::{AssetStore, InMemoryAssetStore};
#[cfg(feature = "sqlite")]
pub use crate::store::SqliteAssetStore;
