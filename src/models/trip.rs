use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-reported rider fitness, 1 (casual) to 5 (athletic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FitnessLevel(u8);

impl FitnessLevel {
    pub fn new(level: u8) -> Result<Self> {
        Self::try_from(level).map_err(AppError::InvalidInput)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for FitnessLevel {
    fn default() -> Self {
        FitnessLevel(MIN_FITNESS_LEVEL)
    }
}

impl TryFrom<u8> for FitnessLevel {
    type Error = String;

    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        if !(MIN_FITNESS_LEVEL..=MAX_FITNESS_LEVEL).contains(&level) {
            return Err(format!(
                "fitness_level must be between {} and {}, got {}",
                MIN_FITNESS_LEVEL, MAX_FITNESS_LEVEL, level
            ));
        }
        Ok(FitnessLevel(level))
    }
}

impl From<FitnessLevel> for u8 {
    fn from(level: FitnessLevel) -> Self {
        level.0
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trip parameters collected by the planning form.
///
/// `days` and `fitness_level` are validated and carried through to the
/// response, but they are reserved: route generation does not use them yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<Coordinates>,
    #[serde(default = "default_track_length_km")]
    pub track_length_km: f64,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default)]
    pub fitness_level: FitnessLevel,
}

fn default_track_length_km() -> f64 {
    DEFAULT_TRACK_LENGTH_KM
}

fn default_days() -> u32 {
    DEFAULT_DAYS
}

impl Default for TripParameters {
    fn default() -> Self {
        TripParameters {
            start_location: None,
            track_length_km: default_track_length_km(),
            days: default_days(),
            fitness_level: FitnessLevel::default(),
        }
    }
}

impl TripParameters {
    pub fn with_start(mut self, start: Coordinates) -> Self {
        self.start_location = Some(start);
        self
    }

    /// The chosen start, or `InvalidInput` if the user has not picked one.
    pub fn resolved_start(&self) -> Result<Coordinates> {
        let start = self.start_location.ok_or_else(|| {
            AppError::InvalidInput("start location has not been chosen".to_string())
        })?;
        start.validate().map_err(AppError::InvalidInput)?;
        Ok(start)
    }

    /// Check every field and return the resolved start.
    pub fn validate(&self) -> Result<Coordinates> {
        let start = self.resolved_start()?;

        if !self.track_length_km.is_finite() || self.track_length_km <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "track_length_km must be a positive number, got {}",
                self.track_length_km
            )));
        }
        if !(MIN_DAYS..=MAX_DAYS).contains(&self.days) {
            return Err(AppError::InvalidInput(format!(
                "days must be between {} and {}",
                MIN_DAYS, MAX_DAYS
            )));
        }
        Ok(start)
    }

    /// Stricter check applied to requests coming from the form: the track
    /// length must also sit inside the slider range.
    pub fn validate_form_ranges(&self) -> Result<Coordinates> {
        let start = self.validate()?;
        if !(MIN_TRACK_LENGTH_KM..=MAX_TRACK_LENGTH_KM).contains(&self.track_length_km) {
            return Err(AppError::InvalidInput(format!(
                "track_length_km must be between {} and {}",
                MIN_TRACK_LENGTH_KM, MAX_TRACK_LENGTH_KM
            )));
        }
        Ok(start)
    }
}
