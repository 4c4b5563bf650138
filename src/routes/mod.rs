pub mod geocode;
pub mod health;
pub mod trips;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/trips/plan", post(trips::plan_trip))
        .route("/trips/station", post(trips::plan_station_trip))
        .route("/trips/gpx", post(trips::render_gpx))
        .route("/trips/export", post(trips::export_trip))
        .route("/geocode", get(geocode::geocode_address))
        .route("/health", get(health::health_check))
        .with_state(state)
}
