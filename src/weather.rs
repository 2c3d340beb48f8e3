//! Open-Meteo current-weather client
//!
//! Fetches the `current` block of the forecast endpoint and turns it into a
//! complete [`WeatherReading`]. Partial metric data is rejected rather than
//! rendered.

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::WeatherConfig;
use crate::models::{Coordinate, WeatherReading};
use crate::{MeteoMapError, Result};

const USER_AGENT: &str = "MeteoMap/0.1.0";

/// Client for the Open-Meteo forecast API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a new client from configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MeteoMapError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current weather for a coordinate
    #[tracing::instrument(
        skip(self, coordinate),
        fields(latitude = coordinate.latitude, longitude = coordinate.longitude)
    )]
    pub async fn current(&self, coordinate: Coordinate) -> Result<WeatherReading> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current=temperature_2m,relative_humidity_2m,precipitation&timezone=auto",
            self.base_url, coordinate.latitude, coordinate.longitude
        );
        debug!("Weather request URL: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MeteoMapError::fetch(format!("failed to fetch data: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather request returned status {status}");
            return Err(MeteoMapError::fetch("failed to fetch data"));
        }

        let payload: ForecastResponse = response.json().await.map_err(|e| {
            MeteoMapError::fetch(format!("Failed to parse weather response: {e}"))
        })?;

        payload
            .current
            .ok_or_else(|| MeteoMapError::fetch("Weather response is missing the current block"))?
            .into_reading()
    }
}

/// Forecast response from the Open-Meteo API, reduced to the current block
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

/// Current-conditions block of a forecast response
///
/// Every field is optional on the wire; [`CurrentConditions::into_reading`]
/// enforces which ones a usable reading requires.
#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    precipitation: Option<f64>,
    time: Option<String>,
}

impl CurrentConditions {
    /// Convert into a reading; all three metrics are mandatory, the
    /// observation time is not
    fn into_reading(self) -> Result<WeatherReading> {
        let temperature_c = self
            .temperature_2m
            .ok_or_else(|| MeteoMapError::fetch("Weather response is missing temperature_2m"))?;
        let humidity_pct = self.relative_humidity_2m.ok_or_else(|| {
            MeteoMapError::fetch("Weather response is missing relative_humidity_2m")
        })?;
        let precipitation_mm = self
            .precipitation
            .ok_or_else(|| MeteoMapError::fetch("Weather response is missing precipitation"))?;

        let observed_at = self.time.as_deref().and_then(parse_observation_time);

        Ok(WeatherReading {
            temperature_c,
            humidity_pct,
            precipitation_mm,
            observed_at,
        })
    }
}

/// Parse the provider-local observation time, e.g. "2024-01-01T12:00"
///
/// Unparsable values are dropped rather than failing the whole reading.
fn parse_observation_time(raw: &str) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(raw, WeatherReading::OBSERVATION_TIME_FORMAT) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("Ignoring unparsable observation time '{raw}': {e}");
            None
        }
    }
}
