// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use services::exporter::FileExporter;
use services::geocoding::GeocodingService;
use services::trip_planner::TripPlanner;
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub planner: TripPlanner,
    pub geocoder: Arc<dyn GeocodingService>,
    pub exporter: Arc<dyn FileExporter>,
}
