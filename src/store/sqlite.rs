//! SQLite-backed asset storage.
//!
//! This module provides `SqliteAssetStore`, which persists assets to a local
//! SQLite database using `sqlx`.
//!
//! # Example
//!
//! ```ignore
//! use asset_tracker::store::{AssetStore, SqliteAssetStore};
//!
//! let store = SqliteAssetStore::connect("sqlite:assets.db?mode=rwc").await?;
//! let id = store.create(&new_asset).await?;
//! let assets = store.get_all().await?;
//! ```

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::AssetStore;
use crate::types::{Asset, AssetError, AssetId, AssetKind, NewAsset};
use crate::validation::DATE_FORMAT;

/// Ordered schema migrations. Entry `n` moves the schema to version `n + 1`.
///
/// Only additive changes belong here, so older databases upgrade in place.
const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS assets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price TEXT NOT NULL,
        purchase_date TEXT NOT NULL
    )
    "#,
    "ALTER TABLE assets ADD COLUMN office TEXT NOT NULL DEFAULT ''",
    "ALTER TABLE assets ADD COLUMN kind TEXT NOT NULL DEFAULT 'Laptop'",
];

/// A SQLite-backed implementation of [`AssetStore`].
///
/// The pool holds a single connection: there is exactly one session, and an
/// in-memory database only lives as long as its connection.
pub struct SqliteAssetStore {
    pool: SqlitePool,
}

impl SqliteAssetStore {
    /// Connects to a SQLite database and brings its schema up to date.
    ///
    /// # Arguments
    /// * `url` - SQLite connection URL (e.g., `"sqlite:assets.db?mode=rwc"`)
    ///
    /// # Errors
    /// Returns `AssetError::Storage` if connection or migration fails.
    pub async fn connect(url: &str) -> Result<Self, AssetError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await
            .map_err(storage("connection"))?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("Opened asset database {}", url);
        Ok(store)
    }

    /// Current schema version as recorded in `PRAGMA user_version`.
    pub async fn schema_version(&self) -> Result<i64, AssetError> {
        sqlx::query_scalar::<_, i64>("PRAGMA user_version")
            .fetch_one(&self.pool)
            .await
            .map_err(storage("schema version"))
    }

    /// Applies every migration newer than the recorded schema version, each
    /// in its own transaction together with the version bump.
    async fn run_migrations(&self) -> Result<(), AssetError> {
        let current = self.schema_version().await?;

        for (index, statement) in MIGRATIONS.iter().enumerate() {
            let version = index as i64 + 1;
            if version <= current {
                continue;
            }

            let mut tx = self.pool.begin().await.map_err(storage("migration"))?;
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(storage("migration"))?;
            let bump = format!("PRAGMA user_version = {}", version);
            sqlx::query(&bump)
                .execute(&mut *tx)
                .await
                .map_err(storage("migration"))?;
            tx.commit().await.map_err(storage("migration"))?;

            info!("Migrated asset schema to version {}", version);
        }

        Ok(())
    }

    /// Returns a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the pool, waiting for the connection to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl AssetStore for SqliteAssetStore {
    async fn create(&self, asset: &NewAsset) -> Result<AssetId, AssetError> {
        let result = sqlx::query(
            r#"
            INSERT INTO assets (kind, name, office, price, purchase_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(asset.kind.as_ref())
        .bind(&asset.name)
        .bind(&asset.office)
        .bind(asset.price.to_string())
        .bind(asset.purchase_date.format(DATE_FORMAT).to_string())
        .execute(&self.pool)
        .await
        .map_err(storage("insert"))?;

        let id = AssetId(result.last_insert_rowid());
        info!("Created asset {} ({})", id, asset.name);
        Ok(id)
    }

    async fn get_all(&self) -> Result<Vec<Asset>, AssetError> {
        let rows = sqlx::query(
            r#"
            SELECT id, kind, name, office, price, purchase_date
            FROM assets
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage("query"))?;

        debug!("Loaded {} assets", rows.len());
        rows.iter().map(asset_from_row).collect()
    }

    async fn get_by_id(&self, id: AssetId) -> Result<Option<Asset>, AssetError> {
        let row = sqlx::query(
            r#"
            SELECT id, kind, name, office, price, purchase_date
            FROM assets
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage("query"))?;

        row.as_ref().map(asset_from_row).transpose()
    }

    async fn update(&self, asset: &Asset) -> Result<bool, AssetError> {
        let result = sqlx::query(
            r#"
            UPDATE assets
            SET kind = ?, name = ?, office = ?, price = ?, purchase_date = ?
            WHERE id = ?
            "#,
        )
        .bind(asset.kind.as_ref())
        .bind(&asset.name)
        .bind(&asset.office)
        .bind(asset.price.to_string())
        .bind(asset.purchase_date.format(DATE_FORMAT).to_string())
        .bind(asset.id.0)
        .execute(&self.pool)
        .await
        .map_err(storage("update"))?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("Updated asset {}", asset.id);
        } else {
            debug!("Update skipped, asset {} does not exist", asset.id);
        }
        Ok(updated)
    }

    async fn delete(&self, id: AssetId) -> Result<bool, AssetError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(storage("delete"))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted asset {}", id);
        } else {
            debug!("Delete skipped, asset {} does not exist", id);
        }
        Ok(deleted)
    }
}

fn asset_from_row(row: &SqliteRow) -> Result<Asset, AssetError> {
    let id: i64 = row.try_get("id").map_err(storage("row decode"))?;
    let kind_str: String = row.try_get("kind").map_err(storage("row decode"))?;
    let name: String = row.try_get("name").map_err(storage("row decode"))?;
    let office: String = row.try_get("office").map_err(storage("row decode"))?;
    let price_str: String = row.try_get("price").map_err(storage("row decode"))?;
    let date_str: String = row.try_get("purchase_date").map_err(storage("row decode"))?;

    let kind = AssetKind::from_str(&kind_str).map_err(|_| corrupt("kind", &kind_str))?;
    let price = Decimal::from_str_exact(&price_str).map_err(|_| corrupt("price", &price_str))?;
    let purchase_date =
        NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|_| corrupt("purchase_date", &date_str))?;

    Ok(Asset {
        id: AssetId(id),
        kind,
        name,
        office,
        price,
        purchase_date,
    })
}

fn storage(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AssetError {
    move |e| AssetError::Storage(format!("SQLite {} error: {}", operation, e))
}

fn corrupt(field: &'static str, value: &str) -> AssetError {
    AssetError::CorruptRecord {
        field,
        value: value.to_string(),
    }
}
