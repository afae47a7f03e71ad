use std::sync::Arc;

use geostuff_core::{City, MAX_LOCATION_LEN, NewCity};
use geostuff_storage::CityStore;

use crate::ServiceError;

pub struct CityService {
    storage: Arc<dyn CityStore>,
}

impl CityService {
    #[must_use]
    pub fn new(storage: Arc<dyn CityStore>) -> Self {
        Self { storage }
    }

    /// Insert a city. Coordinates are stored as given; only the name length is checked,
    /// since the column would reject it anyway.
    pub async fn add_city(&self, city: NewCity) -> Result<City, ServiceError> {
        let len = city.location.chars().count();
        if len > MAX_LOCATION_LEN {
            return Err(ServiceError::InvalidInput(format!(
                "location is {len} characters, at most {MAX_LOCATION_LEN} allowed"
            )));
        }
        Ok(self.storage.add_city(&city).await?)
    }

    pub async fn get_city(&self, point_id: i32) -> Result<Option<City>, ServiceError> {
        Ok(self.storage.get_city(point_id).await?)
    }

    pub async fn require_city(&self, point_id: i32) -> Result<City, ServiceError> {
        self.get_city(point_id).await?.ok_or(ServiceError::CityNotFound(point_id))
    }

    pub async fn list_cities(&self) -> Result<Vec<City>, ServiceError> {
        Ok(self.storage.list_cities().await?)
    }

    pub async fn cities_within_radius(
        &self,
        origin: &City,
        radius_meters: f64,
    ) -> Result<Vec<City>, ServiceError> {
        Ok(self.storage.get_cities_within_radius(origin, radius_meters).await?)
    }

    /// Radius query around a stored city, using the geometry currently stored for it.
    pub async fn nearby(&self, point_id: i32, radius_meters: f64) -> Result<Vec<City>, ServiceError> {
        let origin = self.require_city(point_id).await?;
        if origin.geo.is_none() {
            tracing::warn!(point_id, "origin city has no geometry, run update-geometries");
        }
        self.cities_within_radius(&origin, radius_meters).await
    }

    pub async fn update_geometries(&self) -> Result<usize, ServiceError> {
        Ok(self.storage.update_geometries().await?)
    }
}
