use crate::constants::GPX_CONTENT_TYPE;
use crate::error::{AppError, Result};
use crate::models::route::{
    ExportRequest, ExportResponse, GpxRequest, RouteResponse, StationRequest, TripRequest,
};
use crate::models::Route;
use crate::services::gpx;
use crate::services::projector::{BearingSource, FixedBearing, RandomBearing};
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

fn route_response(route: Route, days: Option<u32>, fitness_level: Option<u8>) -> RouteResponse {
    RouteResponse {
        distance_km: route.distance_km(),
        gpx: gpx::serialize_route(&route),
        days,
        fitness_level,
        route,
    }
}

/// POST /trips/plan
/// Project a destination from the chosen start and return the route with its GPX
pub async fn plan_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TripRequest>,
) -> Result<Json<RouteResponse>> {
    let params = request.parameters;
    params.validate_form_ranges()?;

    tracing::debug!(
        track_length_km = params.track_length_km,
        days = params.days,
        fitness_level = %params.fitness_level,
        fixed_bearing = request.bearing_rad.is_some(),
        "Trip plan request"
    );

    let route = {
        let mut bearings: Box<dyn BearingSource> = match request.bearing_rad {
            Some(bearing) => Box::new(FixedBearing(bearing)),
            None => Box::new(RandomBearing::new()),
        };
        state.planner.plan(&params, bearings.as_mut())?
    };

    Ok(Json(route_response(
        route,
        Some(params.days),
        Some(params.fitness_level.get()),
    )))
}

/// POST /trips/station
/// Route from the start to the nearest station of the requested category
pub async fn plan_station_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StationRequest>,
) -> Result<Json<RouteResponse>> {
    let route = state
        .planner
        .plan_to_station(request.start, request.radius_m, request.category)
        .await?;

    Ok(Json(route_response(route, None, None)))
}

/// POST /trips/gpx
/// Render an arbitrary point list as a GPX download
pub async fn render_gpx(Json(request): Json<GpxRequest>) -> Result<Response> {
    for point in &request.points {
        point.validate().map_err(AppError::InvalidInput)?;
    }

    let document = gpx::serialize(&request.points);

    Ok((
        [
            (header::CONTENT_TYPE, GPX_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"cycleplore.gpx\"",
            ),
        ],
        document,
    )
        .into_response())
}

/// POST /trips/export
/// Write the route's GPX through the configured exporter
pub async fn export_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>> {
    let route = request.route;
    for point in &route.points {
        point.validate().map_err(AppError::InvalidInput)?;
    }

    let document = gpx::serialize_route(&route);
    let file_stem = format!("cycleplore-{}", route.id);
    let path = state.exporter.export(&file_stem, &document).await?;

    Ok(Json(ExportResponse {
        path: path.display().to_string(),
    }))
}
