use crate::constants::{DEFAULT_GEOCODER_BASE_URL, DEFAULT_USER_AGENT, GEOCODER_TIMEOUT_SECONDS};
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Resolves a free-form address to a start coordinate.
#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// `Ok(None)` when the service has no match for the address.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>>;
}

/// Geocoder backed by a Nominatim `/search` endpoint.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_GEOCODER_BASE_URL.to_string(),
            DEFAULT_USER_AGENT.to_string(),
        )
    }

    pub fn with_config(base_url: String, user_agent: String) -> Self {
        NominatimClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent,
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimPlace {
    fn to_coordinates(&self) -> Result<Coordinates> {
        let lat: f64 = self
            .lat
            .parse()
            .map_err(|_| AppError::Geocoding(format!("Invalid latitude '{}'", self.lat)))?;
        let lng: f64 = self
            .lon
            .parse()
            .map_err(|_| AppError::Geocoding(format!("Invalid longitude '{}'", self.lon)))?;
        Coordinates::new(lat, lng).map_err(AppError::Geocoding)
    }
}

#[async_trait]
impl GeocodingService for NominatimClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AppError::InvalidInput("address must not be empty".to_string()));
        }

        tracing::debug!(address, "Geocoding request");

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(Duration::from_secs(GEOCODER_TIMEOUT_SECONDS))
            .send()
            .await
            .map_err(|e| AppError::Geocoding(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(status = %status, "Geocoder HTTP error {}: {}", status, error_text);
            return Err(AppError::Geocoding(format!("HTTP {}: {}", status, error_text)));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| AppError::Geocoding(format!("Failed to parse response: {}", e)))?;

        match places.first() {
            Some(place) => {
                let coords = place.to_coordinates()?;
                tracing::info!(
                    address,
                    lat = coords.lat,
                    lng = coords.lng,
                    "Geocoded '{}' to {}",
                    place.display_name.as_deref().unwrap_or(address),
                    coords
                );
                Ok(Some(coords))
            }
            None => {
                tracing::info!(address, "No geocoding match for '{}'", address);
                Ok(None)
            }
        }
    }
}
