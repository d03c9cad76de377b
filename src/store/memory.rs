use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use super::AssetStore;
use crate::types::{Asset, AssetError, AssetId, NewAsset};

#[derive(Debug)]
struct Inner {
    next_id: i64,
    assets: BTreeMap<AssetId, Asset>,
}

/// Non-durable store kept in process memory.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryAssetStore {
    inner: Mutex<Inner>,
}

impl Default for InMemoryAssetStore {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                assets: BTreeMap::new(),
            }),
        }
    }
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AssetError> {
        self.inner
            .lock()
            .map_err(|_| AssetError::Storage("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn create(&self, asset: &NewAsset) -> Result<AssetId, AssetError> {
        let mut inner = self.lock()?;
        let id = AssetId(inner.next_id);
        inner.next_id += 1;
        inner.assets.insert(id, asset.clone().with_id(id));
        debug!("Created asset {} in memory", id);
        Ok(id)
    }

    async fn get_all(&self) -> Result<Vec<Asset>, AssetError> {
        Ok(self.lock()?.assets.values().cloned().collect())
    }

    async fn get_by_id(&self, id: AssetId) -> Result<Option<Asset>, AssetError> {
        Ok(self.lock()?.assets.get(&id).cloned())
    }

    async fn update(&self, asset: &Asset) -> Result<bool, AssetError> {
        let mut inner = self.lock()?;
        match inner.assets.get_mut(&asset.id) {
            Some(stored) => {
                *stored = asset.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: AssetId) -> Result<bool, AssetError> {
        Ok(self.lock()?.assets.remove(&id).is_some())
    }
}
