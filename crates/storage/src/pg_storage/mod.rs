//! PostgreSQL storage backend using sqlx.

mod cities;

use std::time::Duration;

use geostuff_core::{
    City, GeoPoint, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS,
    PG_POOL_MAX_CONNECTIONS, env_parse_with_default,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

/// Connection pool tuning, overridable through `GEOSTUFF_PG_*` env vars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: PG_POOL_MAX_CONNECTIONS,
            acquire_timeout_secs: PG_POOL_ACQUIRE_TIMEOUT_SECS,
            idle_timeout_secs: PG_POOL_IDLE_TIMEOUT_SECS,
        }
    }
}

impl PoolSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_connections: env_parse_with_default(
                "GEOSTUFF_PG_MAX_CONNECTIONS",
                defaults.max_connections,
            ),
            acquire_timeout_secs: env_parse_with_default(
                "GEOSTUFF_PG_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            ),
            idle_timeout_secs: env_parse_with_default(
                "GEOSTUFF_PG_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout_secs,
            ),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect with env-derived pool settings and make sure the schema exists.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let storage = Self::connect(database_url, PoolSettings::from_env()).await?;
        storage.create_schema().await?;
        tracing::info!("PgStorage initialized");
        Ok(storage)
    }

    /// Connect without touching the schema.
    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        tracing::debug!(max_connections = settings.max_connections, "PostgreSQL pool connected");
        Ok(Self { pool })
    }

    /// Create tables if absent. Safe to call repeatedly.
    pub async fn create_schema(&self) -> Result<(), StorageError> {
        run_pg_migrations(&self.pool).await.map_err(|e| StorageError::Migration(e.to_string()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Geometry is read back as `ST_X`/`ST_Y` doubles so it keeps the exact stored value.
pub(crate) const CITY_COLUMNS: &str =
    "point_id, location, longitude, latitude, ST_X(geo) AS geo_x, ST_Y(geo) AS geo_y";

/// Decode a row selected with `CITY_COLUMNS`.
///
/// `location`, `longitude` and `latitude` are `NOT NULL` in the schema, so a NULL
/// in any of them surfaces as `DataCorruption`. Only `geo` may legitimately be NULL.
pub(crate) fn row_to_city(row: &PgRow) -> Result<City, StorageError> {
    let point_id: i32 = row.try_get("point_id")?;
    let x: Option<f64> = row.try_get("geo_x")?;
    let y: Option<f64> = row.try_get("geo_y")?;
    let geo = x
        .zip(y)
        .map(|(lon, lat)| GeoPoint::new(lon, lat))
        .transpose()
        .map_err(|e| StorageError::DataCorruption {
            context: format!("geo of city {point_id}"),
            source: Box::new(e),
        })?;
    Ok(City {
        point_id,
        location: row.try_get("location")?,
        longitude: row.try_get("longitude")?,
        latitude: row.try_get("latitude")?,
        geo,
    })
}
