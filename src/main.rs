use axum::Router;
use cycleplore::config::Config;
use cycleplore::services::exporter::DirectoryExporter;
use cycleplore::services::geocoding::NominatimClient;
use cycleplore::services::places::OverpassClient;
use cycleplore::services::trip_planner::TripPlanner;
use cycleplore::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cycleplore=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting Cycleplore trip planner");
    tracing::info!(
        geocoder = %config.geocoder_base_url,
        overpass_endpoints = config.overpass_endpoints.len(),
        export_dir = %config.export_dir,
        "Configuration loaded successfully"
    );

    // Initialize services
    let places = Arc::new(OverpassClient::with_endpoints(
        config.overpass_endpoints.clone(),
    ));
    let geocoder = Arc::new(NominatimClient::with_config(
        config.geocoder_base_url.clone(),
        config.user_agent.clone(),
    ));
    let exporter = Arc::new(DirectoryExporter::new(config.export_dir.clone()));
    let planner = TripPlanner::new(places, config.station_search_radius_m);

    // Create application state
    let state = Arc::new(AppState {
        planner,
        geocoder,
        exporter,
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", cycleplore::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
