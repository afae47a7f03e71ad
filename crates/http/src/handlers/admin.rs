use axum::{Json, extract::State};
use std::sync::Arc;

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::UpdateGeometriesResponse;

/// Recompute every city's geometry from its stored coordinates.
pub async fn update_geometries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UpdateGeometriesResponse>, ApiError> {
    let updated = state.city_service.update_geometries().await?;
    Ok(Json(UpdateGeometriesResponse { updated }))
}
