//! Request/query types (Deserialize)

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    /// Search radius in meters. Matches are strictly closer than this.
    pub radius: f64,
}

#[derive(Debug, Deserialize)]
pub struct AddCityRequest {
    pub location: String,
    pub longitude: f64,
    pub latitude: f64,
}
