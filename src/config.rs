use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub geocoder_base_url: String,
    pub overpass_endpoints: Vec<String>,
    pub station_search_radius_m: f64,
    pub export_dir: String,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();
        Self::from_current_env()
    }

    /// Read the process environment without loading `.env`.
    pub fn from_current_env() -> Result<Self, String> {
        let station_search_radius_m: f64 = env::var("STATION_SEARCH_RADIUS_M")
            .unwrap_or_else(|_| DEFAULT_STATION_SEARCH_RADIUS_M.to_string())
            .parse()
            .map_err(|_| "Invalid STATION_SEARCH_RADIUS_M")?;

        if !(MIN_STATION_SEARCH_RADIUS_M..=MAX_STATION_SEARCH_RADIUS_M)
            .contains(&station_search_radius_m)
        {
            return Err(format!(
                "STATION_SEARCH_RADIUS_M must be between {} and {} meters",
                MIN_STATION_SEARCH_RADIUS_M, MAX_STATION_SEARCH_RADIUS_M
            ));
        }

        let overpass_endpoints: Vec<String> = match env::var("OVERPASS_ENDPOINTS") {
            Ok(list) => list
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect(),
            Err(_) => DEFAULT_OVERPASS_ENDPOINTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        if overpass_endpoints.is_empty() {
            return Err("OVERPASS_ENDPOINTS must list at least one URL".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            geocoder_base_url: env::var("GEOCODER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_BASE_URL.to_string()),
            overpass_endpoints,
            station_search_radius_m,
            export_dir: env::var("EXPORT_DIR").unwrap_or_else(|_| DEFAULT_EXPORT_DIR.to_string()),
            user_agent: env::var("HTTP_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
