//! Point geometry in the form PostGIS stores for `geometry(POINT)` columns.
//!
//! Coordinates are degrees, longitude first (WKT axis order). Only finiteness is
//! checked; a latitude of 120 is stored exactly as given.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, SPHERE_RADIUS_METERS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, CoreError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(CoreError::NonFiniteCoordinate { longitude, latitude });
        }
        Ok(Self { longitude, latitude })
    }

    /// WKT text accepted by `ST_GeomFromText`, e.g. `POINT(-122.68 45.52)`.
    pub fn to_wkt(&self) -> String {
        format!("POINT({} {})", self.longitude, self.latitude)
    }

    /// Great-circle distance in meters on the sphere `ST_DistanceSphere` uses.
    pub fn sphere_distance(&self, other: &Self) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * SPHERE_RADIUS_METERS * a.sqrt().min(1.0).asin()
    }

    /// Whether both coordinates agree with `other` within `tolerance` degrees.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.longitude - other.longitude).abs() <= tolerance
            && (self.latitude - other.latitude).abs() <= tolerance
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wkt())
    }
}
