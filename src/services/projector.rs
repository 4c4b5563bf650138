//! Destination-point projection on a spherical Earth.
//!
//! [`project`] is the direct geodesic problem: walk `distance_km` from a start
//! point along an initial bearing and return where you end up. Bearings are
//! supplied by a [`BearingSource`] so the random draw stays outside the
//! projection and tests can pin it.

use crate::constants::EARTH_RADIUS_KM;
use crate::error::{AppError, Result};
use crate::models::coordinates::normalize_longitude;
use crate::models::Coordinates;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::TAU;

/// Supplies the initial bearing (radians, clockwise from north) for each
/// projected destination.
pub trait BearingSource {
    fn next_bearing(&mut self) -> f64;
}

/// Always returns the same bearing.
#[derive(Debug, Clone, Copy)]
pub struct FixedBearing(pub f64);

impl BearingSource for FixedBearing {
    fn next_bearing(&mut self) -> f64 {
        self.0
    }
}

/// Draws bearings uniformly from [0, 2π).
pub struct RandomBearing {
    rng: StdRng,
}

impl RandomBearing {
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Reproducible sequence for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        RandomBearing {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBearing {
    fn default() -> Self {
        Self::new()
    }
}

impl BearingSource for RandomBearing {
    fn next_bearing(&mut self) -> f64 {
        let unit: f64 = StandardUniform.sample(&mut self.rng);
        let bearing = unit * TAU;
        // unit < 1.0, but the product can round up to TAU
        if bearing >= TAU {
            0.0
        } else {
            bearing
        }
    }
}

/// Project `distance_km` from `start` along `bearing_rad`.
///
/// Fails with [`AppError::InvalidInput`] when the start is out of range, the
/// distance is not a positive finite number, or the bearing is outside
/// [0, 2π). The returned longitude is wrapped into [-180, 180).
pub fn project(start: Coordinates, distance_km: f64, bearing_rad: f64) -> Result<Coordinates> {
    start.validate().map_err(AppError::InvalidInput)?;

    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "distance must be a positive number of kilometers, got {}",
            distance_km
        )));
    }
    if !(0.0..TAU).contains(&bearing_rad) {
        return Err(AppError::InvalidInput(format!(
            "bearing must be in [0, 2π) radians, got {}",
            bearing_rad
        )));
    }

    let angular_distance = distance_km / EARTH_RADIUS_KM;
    let lat1 = start.lat.to_radians();
    let lng1 = start.lng.to_radians();

    let sin_lat2 = lat1.sin() * angular_distance.cos()
        + lat1.cos() * angular_distance.sin() * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let lng2 = lng1
        + (bearing_rad.sin() * angular_distance.sin() * lat1.cos())
            .atan2(angular_distance.cos() - lat1.sin() * lat2.sin());

    let destination = Coordinates {
        lat: lat2.to_degrees(),
        lng: normalize_longitude(lng2.to_degrees()),
    };

    tracing::trace!(
        start = %start,
        distance_km,
        bearing_rad,
        destination = %destination,
        "Projected destination"
    );

    Ok(destination)
}
