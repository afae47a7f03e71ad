use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CoreError, GeoPoint};

/// A stored row of the `cities` table.
///
/// `geo` is derived from `longitude`/`latitude` at insert time and by the
/// geometry backfill. Nothing else keeps it in sync, so it can lag behind the
/// scalar columns or be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub point_id: i32,
    pub location: String,
    pub longitude: f64,
    pub latitude: f64,
    pub geo: Option<GeoPoint>,
}

impl City {
    /// Point rebuilt from the scalar coordinate columns.
    pub fn expected_geo(&self) -> Result<GeoPoint, CoreError> {
        GeoPoint::new(self.longitude, self.latitude)
    }

    /// Whether `geo` still matches the scalar coordinates.
    pub fn geo_in_sync(&self) -> bool {
        match (self.geo, self.expected_geo()) {
            (Some(geo), Ok(expected)) => geo.approx_eq(&expected, 1e-9),
            _ => false,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<City {} ({}, {})>", self.location, self.latitude, self.longitude)
    }
}

/// Input for inserting a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCity {
    pub location: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl NewCity {
    pub fn new(location: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self { location: location.into(), longitude, latitude }
    }

    pub fn geo(&self) -> Result<GeoPoint, CoreError> {
        GeoPoint::new(self.longitude, self.latitude)
    }
}
