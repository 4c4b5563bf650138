//! Stable application-wide constants.
//!
//! Values here are geodesy constants, GPX document fixtures, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! Runtime knobs live in [`Config`](crate::config::Config) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Geodesy ---

/// Mean Earth radius (km) of the spherical model used for projection and
/// great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- GPX document ---

/// Value of the `creator` attribute on the `<gpx>` root element.
pub const GPX_CREATOR: &str = "Cycleplore";
/// GPX 1.1 schema namespace.
pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
/// File extension for exported tracks.
pub const GPX_FILE_EXTENSION: &str = "gpx";
/// Media type returned by the GPX endpoint.
pub const GPX_CONTENT_TYPE: &str = "application/gpx+xml";

// --- Trip form ranges (mirror the slider/picker bounds of the mobile form) ---

/// Default track length (km) before the user moves the slider.
pub const DEFAULT_TRACK_LENGTH_KM: f64 = 20.0;
pub const MIN_TRACK_LENGTH_KM: f64 = 20.0;
pub const MAX_TRACK_LENGTH_KM: f64 = 200.0;
pub const DEFAULT_DAYS: u32 = 1;
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 10;
pub const MIN_FITNESS_LEVEL: u8 = 1;
pub const MAX_FITNESS_LEVEL: u8 = 5;

// --- Boundary services ---

/// Nominatim search API used for address geocoding.
pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Overpass API endpoints, rotated round-robin on failure.
pub const DEFAULT_OVERPASS_ENDPOINTS: &[&str] = &[
    "https://overpass-api.de/api/interpreter",
    "https://overpass.private.coffee/api/interpreter",
];
/// Nominatim's usage policy requires an identifying User-Agent.
pub const DEFAULT_USER_AGENT: &str = "cycleplore/0.1";
/// Default radius (meters) for the nearest train station lookup.
pub const DEFAULT_STATION_SEARCH_RADIUS_M: f64 = 5_000.0;
pub const MIN_STATION_SEARCH_RADIUS_M: f64 = 100.0;
pub const MAX_STATION_SEARCH_RADIUS_M: f64 = 50_000.0;
/// Default directory for exported GPX files.
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// Per-request timeout for Overpass queries (seconds).
pub const OVERPASS_QUERY_TIMEOUT_SECONDS: u64 = 25;
/// Retries after the first Overpass attempt (2 = 3 total attempts).
pub const OVERPASS_RETRY_MAX_ATTEMPTS: usize = 2;
pub const OVERPASS_HTTP_TOO_MANY_REQUESTS: u16 = 429;
pub const OVERPASS_HTTP_GATEWAY_TIMEOUT: u16 = 504;
/// Per-request timeout for geocoding lookups (seconds).
pub const GEOCODER_TIMEOUT_SECONDS: u64 = 10;
