use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    pub address: String,
}

/// GET /geocode?address=...
/// Resolve a typed address to a start point
pub async fn geocode_address(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<Coordinates>> {
    let coords = state
        .geocoder
        .geocode(&params.address)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No location found for '{}'", params.address.trim()))
        })?;

    Ok(Json(coords))
}
