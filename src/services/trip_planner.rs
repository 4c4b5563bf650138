use crate::constants::{MAX_STATION_SEARCH_RADIUS_M, MIN_STATION_SEARCH_RADIUS_M};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Route, RouteKind, TripParameters};
use crate::services::places::{PlaceCategory, PlacesSearchService};
use crate::services::projector::{self, BearingSource};
use std::sync::Arc;

/// Builds trip routes from form parameters.
pub struct TripPlanner {
    places: Arc<dyn PlacesSearchService>,
    station_search_radius_m: f64,
}

impl TripPlanner {
    pub fn new(places: Arc<dyn PlacesSearchService>, station_search_radius_m: f64) -> Self {
        TripPlanner {
            places,
            station_search_radius_m,
        }
    }

    /// Project a destination `track_length_km` away from the chosen start
    /// and return the two-point route `[start, destination]`.
    ///
    /// `days` and `fitness_level` are validated but do not shape the route.
    pub fn plan(
        &self,
        params: &TripParameters,
        bearings: &mut dyn BearingSource,
    ) -> Result<Route> {
        let start = params.validate()?;

        let bearing = bearings.next_bearing();
        let destination = projector::project(start, params.track_length_km, bearing)?;
        let route = Route::between(RouteKind::Destination, start, destination);

        tracing::info!(
            route_id = %route.id,
            start = %start,
            destination = %destination,
            track_length_km = params.track_length_km,
            bearing_deg = bearing.to_degrees(),
            days = params.days,
            fitness_level = %params.fitness_level,
            "Planned {:.1}km trip",
            params.track_length_km
        );

        Ok(route)
    }

    /// Route from `start` to the nearest station of `category` (train
    /// stations when `None`) within `radius_m` (the configured default when
    /// `None`). The radius must lie in the same range the config accepts.
    pub async fn plan_to_station(
        &self,
        start: Coordinates,
        radius_m: Option<f64>,
        category: Option<PlaceCategory>,
    ) -> Result<Route> {
        start.validate().map_err(AppError::InvalidInput)?;

        let radius_m = radius_m.unwrap_or(self.station_search_radius_m);
        if !(MIN_STATION_SEARCH_RADIUS_M..=MAX_STATION_SEARCH_RADIUS_M).contains(&radius_m) {
            return Err(AppError::InvalidInput(format!(
                "search radius must be between {} and {} meters, got {}",
                MIN_STATION_SEARCH_RADIUS_M, MAX_STATION_SEARCH_RADIUS_M, radius_m
            )));
        }

        let category = category.unwrap_or_default();
        let station = self
            .places
            .find_nearest(&start, radius_m, category)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No {} within {:.0}m of {}",
                    category, radius_m, start
                ))
            })?;

        let route =
            Route::new(RouteKind::Station, vec![start]).extended(RouteKind::Station, station);

        tracing::info!(
            route_id = %route.id,
            start = %start,
            station = %station,
            category = %category,
            distance_km = route.distance_km(),
            "Found nearest station"
        );

        Ok(route)
    }
}
