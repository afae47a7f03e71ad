//! In-memory `CityStore` used by service and HTTP tests.
//!
//! Distances come from `GeoPoint::sphere_distance`, which follows the sphere
//! `ST_DistanceSphere` uses. Results are close to PostGIS but not bit-identical.

use async_trait::async_trait;
use geostuff_core::{City, GeoPoint, NewCity};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::CityStore;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i32,
    cities: Vec<City>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a row's coordinates without touching `geo`, as a write
    /// through some other path would.
    pub async fn set_coordinates(
        &self,
        point_id: i32,
        longitude: f64,
        latitude: f64,
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        let city = inner
            .cities
            .iter_mut()
            .find(|c| c.point_id == point_id)
            .ok_or_else(|| StorageError::NotFound { entity: "city", id: point_id.to_string() })?;
        city.longitude = longitude;
        city.latitude = latitude;
        Ok(())
    }

    /// Drop a row's geometry, as rows loaded before the column existed would be.
    pub async fn clear_geometry(&self, point_id: i32) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        let city = inner
            .cities
            .iter_mut()
            .find(|c| c.point_id == point_id)
            .ok_or_else(|| StorageError::NotFound { entity: "city", id: point_id.to_string() })?;
        city.geo = None;
        Ok(())
    }
}

#[async_trait]
impl CityStore for MemoryStorage {
    async fn add_city(&self, city: &NewCity) -> Result<City, StorageError> {
        let geo = city.geo()?;
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let stored = City {
            point_id: inner.next_id,
            location: city.location.clone(),
            longitude: city.longitude,
            latitude: city.latitude,
            geo: Some(geo),
        };
        inner.cities.push(stored.clone());
        Ok(stored)
    }

    async fn get_city(&self, point_id: i32) -> Result<Option<City>, StorageError> {
        let inner = self.inner.read().await;
        Ok(inner.cities.iter().find(|c| c.point_id == point_id).cloned())
    }

    async fn list_cities(&self) -> Result<Vec<City>, StorageError> {
        Ok(self.inner.read().await.cities.clone())
    }

    async fn get_cities_within_radius(
        &self,
        origin: &City,
        radius_meters: f64,
    ) -> Result<Vec<City>, StorageError> {
        let Some(center) = origin.geo else {
            return Ok(Vec::new());
        };
        let inner = self.inner.read().await;
        Ok(inner
            .cities
            .iter()
            .filter(|c| c.geo.is_some_and(|g| g.sphere_distance(&center) < radius_meters))
            .cloned()
            .collect())
    }

    async fn distance_between(&self, a: i32, b: i32) -> Result<Option<f64>, StorageError> {
        let inner = self.inner.read().await;
        let geo_of = |id: i32| inner.cities.iter().find(|c| c.point_id == id).and_then(|c| c.geo);
        Ok(geo_of(a).zip(geo_of(b)).map(|(x, y)| x.sphere_distance(&y)))
    }

    async fn update_geometries(&self) -> Result<usize, StorageError> {
        let mut inner = self.inner.write().await;
        let recomputed = inner
            .cities
            .iter()
            .map(|c| GeoPoint::new(c.longitude, c.latitude))
            .collect::<Result<Vec<_>, _>>()?;
        for (city, geo) in inner.cities.iter_mut().zip(recomputed) {
            city.geo = Some(geo);
        }
        Ok(inner.cities.len())
    }
}
