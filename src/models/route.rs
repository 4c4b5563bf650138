use crate::models::{Coordinates, TripParameters};
use crate::services::places::PlaceCategory;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Start plus a projected destination
    #[default]
    Destination,
    /// Start plus the nearest train station
    Station,
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteKind::Destination => write!(f, "destination"),
            RouteKind::Station => write!(f, "station"),
        }
    }
}

/// Ordered list of points exported as a single GPX track.
///
/// The first point is always the trip's start. A route is replaced rather
/// than edited; [`Route::extended`] consumes the old one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub kind: RouteKind,
    pub points: Vec<Coordinates>,
}

impl Route {
    pub fn new(kind: RouteKind, points: Vec<Coordinates>) -> Self {
        Route {
            id: Uuid::new_v4(),
            kind,
            points,
        }
    }

    pub fn between(kind: RouteKind, start: Coordinates, end: Coordinates) -> Self {
        Route::new(kind, vec![start, end])
    }

    /// Return a new route with `point` appended.
    pub fn extended(self, kind: RouteKind, point: Coordinates) -> Self {
        let mut points = self.points;
        points.push(point);
        Route::new(kind, points)
    }

    pub fn start(&self) -> Option<&Coordinates> {
        self.points.first()
    }

    pub fn end(&self) -> Option<&Coordinates> {
        self.points.last()
    }

    /// Sum of great-circle leg lengths in kilometers
    pub fn distance_km(&self) -> f64 {
        self.points
            .windows(2)
            .map(|leg| leg[0].distance_to(&leg[1]))
            .sum()
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    #[serde(flatten)]
    pub parameters: TripParameters,
    /// Fixed bearing in radians; drawn at random when absent.
    #[serde(default)]
    pub bearing_rad: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub route: Route,
    pub distance_km: f64,
    /// Echoed from the trip form; absent for station routes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<u8>,
    pub gpx: String,
}

#[derive(Debug, Deserialize)]
pub struct StationRequest {
    pub start: Coordinates,
    #[serde(default)]
    pub radius_m: Option<f64>,
    /// Kind of station to look for; train stations when absent.
    #[serde(default)]
    pub category: Option<PlaceCategory>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GpxRequest {
    pub points: Vec<Coordinates>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRequest {
    pub route: Route,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResponse {
    pub path: String,
}
