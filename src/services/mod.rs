pub mod exporter;
pub mod geocoding;
pub mod gpx;
pub mod places;
pub mod projector;
pub mod trip_planner;
