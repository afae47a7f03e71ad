//! Response types (Serialize)

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UpdateGeometriesResponse {
    pub updated: usize,
}
