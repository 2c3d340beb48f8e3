//! Open-Meteo geocoding client
//!
//! Resolves free-text place names to coordinates via the Open-Meteo
//! geocoding API. No API key is required.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::GeocodingConfig;
use crate::models::{Coordinate, Place};
use crate::{MeteoMapError, Result};

const USER_AGENT: &str = "MeteoMap/0.1.0";

/// Client for the Open-Meteo geocoding API
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl GeocodingClient {
    /// Create a new client from configuration
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
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

    /// Look up a place name, returning matches in provider-ranking order
    ///
    /// An empty list is a legitimate outcome (nothing matched); network and
    /// payload failures are resolution errors.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, name: &str) -> Result<Vec<Place>> {
        let url = format!(
            "{}/v1/search?name={}&count=5&language=en&format=json",
            self.base_url,
            urlencoding::encode(name)
        );
        debug!("Geocoding request URL: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MeteoMapError::resolution(format!("Geocoding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding request returned status {status}");
            return Err(MeteoMapError::resolution(format!(
                "Geocoding request failed with status {status}"
            )));
        }

        let payload: GeocodingResponse = response.json().await.map_err(|e| {
            MeteoMapError::resolution(format!("Failed to parse geocoding response: {e}"))
        })?;

        let matches = payload
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Place::try_from)
            .collect::<Result<Vec<_>>>()?;

        if matches.is_empty() {
            warn!("No geocoding results for '{name}'");
        } else {
            info!("Found {} geocoding results for '{name}'", matches.len());
        }

        Ok(matches)
    }
}

/// Geocoding response from the Open-Meteo geocoding API
///
/// The `results` key is absent entirely when nothing matched.
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

/// One match inside a geocoding response
#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
    name: Option<String>,
    country: Option<String>,
    admin1: Option<String>,
}

impl TryFrom<GeocodingResult> for Place {
    type Error = MeteoMapError;

    fn try_from(result: GeocodingResult) -> Result<Place> {
        let coordinate = Coordinate::new(result.latitude, result.longitude).map_err(|_| {
            MeteoMapError::resolution(format!(
                "Geocoding result has out-of-range coordinates ({}, {})",
                result.latitude, result.longitude
            ))
        })?;

        // Open-Meteo always names its matches; fall back to the raw
        // coordinates if a provider ever omits the name.
        let name = result
            .name
            .unwrap_or_else(|| coordinate.format_rounded());

        Ok(Place {
            name,
            country: result.country,
            admin1: result.admin1,
            coordinate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(mock_server: &MockServer) -> GeocodingClient {
        let config = GeocodingConfig {
            base_url: mock_server.uri(),
            timeout_seconds: 5,
        };
        GeocodingClient::new(&config).unwrap()
    }

    #[test]
    fn test_parse_geocoding_response() {
        let json = r#"{
            "results": [
                {
                    "name": "Tokyo",
                    "latitude": 35.6895,
                    "longitude": 139.6917,
                    "country": "Japan",
                    "admin1": "Tokyo"
                }
            ]
        }"#;

        let response: GeocodingResponse = serde_json::from_str(json).unwrap();
        let results = response.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name.as_deref(), Some("Tokyo"));
        assert_eq!(results[0].latitude, 35.6895);
    }

    #[test]
    fn test_parse_geocoding_response_without_results_key() {
        let response: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();
        assert!(response.results.is_none());
    }

    #[test]
    fn test_try_from_rejects_out_of_range_coordinates() {
        let result = GeocodingResult {
            latitude: 135.0,
            longitude: 10.0,
            name: Some("Broken".to_string()),
            country: None,
            admin1: None,
        };
        let converted = Place::try_from(result);
        assert!(matches!(converted, Err(MeteoMapError::Resolution { .. })));
    }

    #[test]
    fn test_try_from_without_name_uses_coordinates() {
        let result = GeocodingResult {
            latitude: 10.0,
            longitude: 20.0,
            name: None,
            country: None,
            admin1: None,
        };
        let place = Place::try_from(result).unwrap();
        assert_eq!(place.name, "10.00, 20.00");
    }

    #[tokio::test]
    async fn test_search_returns_matches_in_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "Paris"))
            .and(query_param("count", "5"))
            .and(query_param("language", "en"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"name": "Paris", "latitude": 48.8566, "longitude": 2.3522, "country": "France"},
                    {"name": "Paris", "latitude": 33.66, "longitude": -95.55, "country": "United States", "admin1": "Texas"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let matches = client_for(&mock_server).search("Paris").await.unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].country.as_deref(), Some("France"));
        assert_eq!(matches[0].coordinate.latitude, 48.8566);
        assert_eq!(matches[1].admin1.as_deref(), Some("Texas"));
    }

    #[tokio::test]
    async fn test_search_with_no_matches_returns_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"generationtime_ms": 0.3})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let matches = client_for(&mock_server).search("Nowhereland").await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_search_encodes_the_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .and(query_param("name", "São Paulo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"name": "São Paulo", "latitude": -23.55, "longitude": -46.63, "country": "Brazil"}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let matches = client_for(&mock_server).search("São Paulo").await.unwrap();
        assert_eq!(matches.len(), 1);
    }

    #[tokio::test]
    async fn test_search_maps_server_error_to_resolution_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).search("Tokyo").await;
        assert!(matches!(result, Err(MeteoMapError::Resolution { .. })));
    }

    #[tokio::test]
    async fn test_search_maps_malformed_body_to_resolution_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).search("Tokyo").await;
        assert!(matches!(result, Err(MeteoMapError::Resolution { .. })));
    }
}
