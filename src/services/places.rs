use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    #[default]
    TrainStation,
    PublicTransportStation,
}

impl PlaceCategory {
    /// OSM tag (key, value) selecting this category
    pub fn osm_tag(&self) -> (&'static str, &'static str) {
        match self {
            PlaceCategory::TrainStation => ("railway", "station"),
            PlaceCategory::PublicTransportStation => ("public_transport", "station"),
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceCategory::TrainStation => write!(f, "train_station"),
            PlaceCategory::PublicTransportStation => write!(f, "public_transport_station"),
        }
    }
}

/// Finds the closest point of interest of a category around a center.
#[async_trait]
pub trait PlacesSearchService: Send + Sync {
    /// `Ok(None)` when nothing matches within `radius_m`.
    async fn find_nearest(
        &self,
        center: &Coordinates,
        radius_m: f64,
        category: PlaceCategory,
    ) -> Result<Option<Coordinates>>;
}

#[derive(Clone)]
pub struct OverpassClient {
    client: Client,
    endpoints: Vec<String>,
    current_endpoint_idx: Arc<AtomicUsize>,
    max_retries: usize,
    backoff_base_ms: u64,
}

impl OverpassClient {
    pub fn new() -> Self {
        Self::with_endpoints(
            DEFAULT_OVERPASS_ENDPOINTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    pub fn with_endpoints(endpoints: Vec<String>) -> Self {
        OverpassClient {
            client: Client::new(),
            endpoints,
            current_endpoint_idx: Arc::new(AtomicUsize::new(0)),
            max_retries: OVERPASS_RETRY_MAX_ATTEMPTS,
            backoff_base_ms: 1000,
        }
    }

    /// Override retry policy (0 retries = single attempt).
    pub fn with_retry_policy(mut self, max_retries: usize, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Get the next endpoint to try (round-robin)
    fn next_endpoint(&self) -> Option<&str> {
        if self.endpoints.is_empty() {
            return None;
        }
        let idx = self.current_endpoint_idx.fetch_add(1, Ordering::Relaxed);
        Some(self.endpoints[idx % self.endpoints.len()].as_str())
    }

    fn build_query(center: &Coordinates, radius_m: f64, category: PlaceCategory) -> String {
        let (key, value) = category.osm_tag();
        let around = format!("around:{:.0},{},{}", radius_m, center.lat, center.lng);
        format!(
            "[out:json][timeout:{}];(node[\"{key}\"=\"{value}\"]({around});way[\"{key}\"=\"{value}\"]({around}););out center;",
            OVERPASS_QUERY_TIMEOUT_SECONDS
        )
    }

    async fn execute_query_with_retry(&self, query: &str) -> Result<OverpassResponse> {
        let mut retry_count = 0;

        loop {
            let endpoint = self
                .next_endpoint()
                .ok_or_else(|| {
                    AppError::PlacesSearch("No Overpass endpoints configured".to_string())
                })?
                .to_string();

            let response_result = self
                .client
                .post(&endpoint)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(format!("data={}", urlencoding::encode(query)))
                .timeout(Duration::from_secs(OVERPASS_QUERY_TIMEOUT_SECONDS))
                .send()
                .await;

            let error_msg = match response_result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json().await.map_err(|e| {
                            AppError::PlacesSearch(format!("Failed to parse response: {}", e))
                        });
                    }

                    let is_retryable = status.as_u16() == OVERPASS_HTTP_TOO_MANY_REQUESTS
                        || status.as_u16() == OVERPASS_HTTP_GATEWAY_TIMEOUT;
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());

                    if !is_retryable {
                        return Err(AppError::PlacesSearch(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                    format!("returned HTTP {}", status)
                }
                Err(e) if e.is_timeout() => "request timed out".to_string(),
                Err(e) => format!("request failed: {}", e),
            };

            if retry_count >= self.max_retries {
                return Err(AppError::PlacesSearch(format!(
                    "Overpass {} after {} attempts",
                    error_msg,
                    retry_count + 1
                )));
            }

            retry_count += 1;
            let backoff_ms = self.backoff_base_ms * 2_u64.pow(retry_count as u32);
            tracing::warn!(
                endpoint = %endpoint,
                "Overpass {}, retrying in {}ms (attempt {}/{})",
                error_msg,
                backoff_ms,
                retry_count + 1,
                self.max_retries + 1
            );
            tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        }
    }
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    /// Nodes carry lat/lon directly, ways carry a computed center.
    fn coordinates(&self) -> Option<Coordinates> {
        let (lat, lon) = match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => (lat, lon),
            (_, _, Some(center)) => (center.lat, center.lon),
            _ => return None,
        };
        Coordinates::new(lat, lon).ok()
    }
}

fn nearest_element(center: &Coordinates, elements: &[OverpassElement]) -> Option<Coordinates> {
    elements
        .iter()
        .filter_map(OverpassElement::coordinates)
        .min_by(|a, b| center.distance_to(a).total_cmp(&center.distance_to(b)))
}

#[async_trait]
impl PlacesSearchService for OverpassClient {
    async fn find_nearest(
        &self,
        center: &Coordinates,
        radius_m: f64,
        category: PlaceCategory,
    ) -> Result<Option<Coordinates>> {
        let query = Self::build_query(center, radius_m, category);
        tracing::debug!("Overpass query: {}", query);

        let response = self.execute_query_with_retry(&query).await?;
        let nearest = nearest_element(center, &response.elements);

        tracing::info!(
            category = %category,
            candidates = response.elements.len(),
            found = nearest.is_some(),
            "Places search around {} within {:.0}m",
            center,
            radius_m
        );

        Ok(nearest)
    }
}
