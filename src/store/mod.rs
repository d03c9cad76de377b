//! Persistence of asset records.
//!
//! [`AssetStore`] is the only way the rest of the crate touches stored
//! assets. Every write is durable before the call returns.

use async_trait::async_trait;

use crate::types::{Asset, AssetError, AssetId, NewAsset};

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::InMemoryAssetStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteAssetStore;

#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Stores a new asset and returns the id assigned to it.
    async fn create(&self, asset: &NewAsset) -> Result<AssetId, AssetError>;

    /// All stored assets in id order.
    async fn get_all(&self) -> Result<Vec<Asset>, AssetError>;

    /// `Ok(None)` when no asset has this id.
    async fn get_by_id(&self, id: AssetId) -> Result<Option<Asset>, AssetError>;

    /// Replaces the stored record with the same id.
    ///
    /// Returns `false` and changes nothing if the id is unknown.
    async fn update(&self, asset: &Asset) -> Result<bool, AssetError>;

    /// Removes the record. Returns `false` if there was nothing to remove.
    async fn delete(&self, id: AssetId) -> Result<bool, AssetError>;
}
