use async_trait::async_trait;
use geostuff_core::{City, NewCity};

use crate::error::StorageError;

/// Persistence and spatial queries over the `cities` table.
#[async_trait]
pub trait CityStore: Send + Sync {
    /// Insert a city with its point geometry and commit immediately.
    async fn add_city(&self, city: &NewCity) -> Result<City, StorageError>;

    /// Get city by `point_id`.
    async fn get_city(&self, point_id: i32) -> Result<Option<City>, StorageError>;

    /// All cities, ordered by `point_id`.
    async fn list_cities(&self) -> Result<Vec<City>, StorageError>;

    /// Cities whose sphere distance to `origin.geo` is strictly below `radius_meters`.
    ///
    /// The origin itself matches for any positive radius. An origin without
    /// geometry matches nothing.
    async fn get_cities_within_radius(
        &self,
        origin: &City,
        radius_meters: f64,
    ) -> Result<Vec<City>, StorageError>;

    /// Sphere distance in meters between two stored cities.
    /// `None` if either row or its geometry is missing.
    async fn distance_between(&self, a: i32, b: i32) -> Result<Option<f64>, StorageError>;

    /// Recompute `geo` for every row from its coordinates in a single transaction.
    /// Returns the number of rows rewritten. Any failure leaves the table untouched.
    async fn update_geometries(&self) -> Result<usize, StorageError>;
}
