//! JSON API for the dashboard page
//!
//! A single endpoint, `POST /api/dashboard`, accepts one interaction's
//! inputs and returns the render state for the page.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dashboard::{
    CoordinateSource, CycleInput, CycleOutcome, Dashboard, Resolution, WeatherOutcome,
};
use crate::models::Coordinate;

/// One interaction's inputs, as posted by the page
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCycleRequest {
    /// Current value of the location text field
    #[serde(default)]
    pub name: Option<String>,
    /// Map click of this interaction, if any
    #[serde(default)]
    pub click: Option<ApiMapClick>,
}

/// Map click event as emitted by the map widget
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ApiMapClick {
    pub lat: f64,
    pub lng: f64,
}

/// Render state for one cycle
#[derive(Debug, Clone, Serialize)]
pub struct ApiDashboardState {
    pub resolution: Option<ApiResolution>,
    pub selection: Option<ApiSelection>,
    pub weather: Option<ApiWeather>,
}

/// Banner state of the name-resolution step
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApiResolution {
    /// The query resolved; label and coordinates for the confirmation banner
    Found {
        label: String,
        latitude: f64,
        longitude: f64,
        rounded: String,
    },
    /// The query did not resolve; message for the error banner
    NotFound { message: String },
}

/// The coordinate the cycle settled on
#[derive(Debug, Clone, Serialize)]
pub struct ApiSelection {
    pub latitude: f64,
    pub longitude: f64,
    pub rounded: String,
    pub source: ApiCoordinateSource,
}

/// Provenance of the selected coordinate
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiCoordinateSource {
    Search,
    MapClick,
}

impl From<CoordinateSource> for ApiCoordinateSource {
    fn from(source: CoordinateSource) -> Self {
        match source {
            CoordinateSource::Search => Self::Search,
            CoordinateSource::MapClick => Self::MapClick,
        }
    }
}

/// Metric tiles or the fetch-failure banner
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApiWeather {
    Displayed {
        temperature_c: f64,
        humidity_pct: f64,
        precipitation_mm: f64,
        /// Provider-local observation time, "N/A" when not reported
        observed_at: String,
    },
    Failed { message: String },
}

impl From<&CycleOutcome> for ApiDashboardState {
    fn from(outcome: &CycleOutcome) -> Self {
        let resolution = outcome.resolution.as_ref().map(|resolution| match resolution {
            Resolution::Found { place } => ApiResolution::Found {
                label: place.display_name(),
                latitude: place.coordinate.latitude,
                longitude: place.coordinate.longitude,
                rounded: place.coordinate.format_rounded(),
            },
            Resolution::NotFound { message } => ApiResolution::NotFound {
                message: message.clone(),
            },
        });

        let selection = outcome.selection.as_ref().map(|selection| ApiSelection {
            latitude: selection.coordinate.latitude,
            longitude: selection.coordinate.longitude,
            rounded: selection.coordinate.format_rounded(),
            source: selection.source.into(),
        });

        let weather = outcome.weather.as_ref().map(|weather| match weather {
            WeatherOutcome::Displayed { reading } => ApiWeather::Displayed {
                temperature_c: reading.temperature_c,
                humidity_pct: reading.humidity_pct,
                precipitation_mm: reading.precipitation_mm,
                observed_at: reading.observed_at_label(),
            },
            WeatherOutcome::Failed { message } => ApiWeather::Failed {
                message: message.clone(),
            },
        });

        Self {
            resolution,
            selection,
            weather,
        }
    }
}

/// Build the `/api` router
pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/dashboard", post(run_dashboard_cycle))
        .with_state(dashboard)
}

/// Run one dashboard cycle from the page's posted inputs
async fn run_dashboard_cycle(
    State(dashboard): State<Arc<Dashboard>>,
    Json(request): Json<ApiCycleRequest>,
) -> Result<Json<ApiDashboardState>, StatusCode> {
    let map_click = match request.click {
        Some(click) => Some(Coordinate::new(click.lat, click.lng).map_err(|err| {
            debug!("Rejecting map click: {err}");
            StatusCode::BAD_REQUEST
        })?),
        None => None,
    };

    let input = CycleInput {
        place_name: request.name,
        map_click,
    };
    let outcome = dashboard.run_cycle(input).await;

    Ok(Json(ApiDashboardState::from(&outcome)))
}
