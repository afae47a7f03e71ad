use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use geostuff_core::{City, NewCity};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{AddCityRequest, NearbyQuery};

pub async fn list_cities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<City>>, ApiError> {
    Ok(Json(state.city_service.list_cities().await?))
}

pub async fn add_city(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddCityRequest>,
) -> Result<(StatusCode, Json<City>), ApiError> {
    let city = state
        .city_service
        .add_city(NewCity::new(req.location, req.longitude, req.latitude))
        .await?;
    Ok((StatusCode::CREATED, Json(city)))
}

pub async fn get_city(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<City>, ApiError> {
    Ok(Json(state.city_service.require_city(id).await?))
}

pub async fn nearby(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<City>>, ApiError> {
    Ok(Json(state.city_service.nearby(id, query.radius).await?))
}
