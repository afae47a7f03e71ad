//! CityStore implementation for PgStorage.

use async_trait::async_trait;
use geostuff_core::{City, GeoPoint, NewCity};
use sqlx::Row;

use super::{CITY_COLUMNS, PgStorage, row_to_city};
use crate::error::StorageError;
use crate::traits::CityStore;

#[async_trait]
impl CityStore for PgStorage {
    async fn add_city(&self, city: &NewCity) -> Result<City, StorageError> {
        let geo = city.geo()?;
        let row = sqlx::query(&format!(
            "INSERT INTO cities (location, longitude, latitude, geo)
             VALUES ($1, $2, $3, ST_GeomFromText($4))
             RETURNING {CITY_COLUMNS}"
        ))
        .bind(&city.location)
        .bind(city.longitude)
        .bind(city.latitude)
        .bind(geo.to_wkt())
        .fetch_one(&self.pool)
        .await?;
        let stored = row_to_city(&row)?;
        tracing::info!(point_id = stored.point_id, location = %stored.location, "city added");
        Ok(stored)
    }

    async fn get_city(&self, point_id: i32) -> Result<Option<City>, StorageError> {
        let row = sqlx::query(&format!("SELECT {CITY_COLUMNS} FROM cities WHERE point_id = $1"))
            .bind(point_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_city(&r)).transpose()
    }

    async fn list_cities(&self) -> Result<Vec<City>, StorageError> {
        let rows = sqlx::query(&format!("SELECT {CITY_COLUMNS} FROM cities ORDER BY point_id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_city).collect()
    }

    async fn get_cities_within_radius(
        &self,
        origin: &City,
        radius_meters: f64,
    ) -> Result<Vec<City>, StorageError> {
        // A NULL origin geometry makes every distance NULL, so nothing matches.
        let rows = sqlx::query(&format!(
            "SELECT {CITY_COLUMNS} FROM cities
             WHERE ST_DistanceSphere(geo, ST_MakePoint($1, $2)) < $3"
        ))
        .bind(origin.geo.map(|g| g.longitude))
        .bind(origin.geo.map(|g| g.latitude))
        .bind(radius_meters)
        .fetch_all(&self.pool)
        .await?;
        tracing::debug!(
            origin = origin.point_id,
            radius_meters,
            matches = rows.len(),
            "radius query"
        );
        rows.iter().map(row_to_city).collect()
    }

    async fn distance_between(&self, a: i32, b: i32) -> Result<Option<f64>, StorageError> {
        let row = sqlx::query(
            "SELECT ST_DistanceSphere(a.geo, b.geo) AS distance
             FROM cities a, cities b
             WHERE a.point_id = $1 AND b.point_id = $2",
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(r) => Ok(r.try_get::<Option<f64>, _>("distance")?),
            None => Ok(None),
        }
    }

    async fn update_geometries(&self) -> Result<usize, StorageError> {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query("SELECT point_id, longitude, latitude FROM cities ORDER BY point_id")
            .fetch_all(&mut *tx)
            .await?;

        let mut updated: usize = 0;
        for row in &rows {
            let point_id: i32 = row.try_get("point_id")?;
            let geo = GeoPoint::new(row.try_get("longitude")?, row.try_get("latitude")?)
                .inspect_err(|e| tracing::warn!(point_id, error = %e, "aborting geometry backfill"))?;
            sqlx::query("UPDATE cities SET geo = ST_GeomFromText($1) WHERE point_id = $2")
                .bind(geo.to_wkt())
                .bind(point_id)
                .execute(&mut *tx)
                .await?;
            updated += 1;
        }

        tx.commit().await?;
        tracing::info!(updated, "city geometries recomputed");
        Ok(updated)
    }
}
