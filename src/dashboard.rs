//! The per-interaction dashboard cycle
//!
//! One cycle takes the page's inputs (search text, optional map click), runs
//! name resolution, applies the click override, fetches the weather for the
//! selected coordinate and produces the render state for the page. Cycles
//! share nothing; every interaction is evaluated from its inputs alone.

use tracing::{debug, info};

use crate::config::MeteoMapConfig;
use crate::geocoding::GeocodingClient;
use crate::location_resolver::LocationResolver;
use crate::models::{Coordinate, Place, WeatherReading};
use crate::weather::WeatherClient;
use crate::Result;

/// Where the selected coordinate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSource {
    /// Name resolution via the geocoding lookup
    Search,
    /// A click on the world map
    MapClick,
}

/// The coordinate a cycle settled on, with its provenance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub coordinate: Coordinate,
    pub source: CoordinateSource,
}

/// Outcome of the name-resolution step
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The first geocoding match for the query
    Found { place: Place },
    /// No usable match; carries the banner message
    NotFound { message: String },
}

/// Outcome of the weather step
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    /// A complete reading, ready for the metric tiles
    Displayed { reading: WeatherReading },
    /// The lookup failed; carries the banner message
    Failed { message: String },
}

/// Inputs of one interaction cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleInput {
    /// Current value of the location text field
    pub place_name: Option<String>,
    /// Map click of this cycle, already validated
    pub map_click: Option<Coordinate>,
}

/// Render state produced by one cycle
#[derive(Debug, Clone, Default)]
pub struct CycleOutcome {
    /// Banner for the name-resolution step, present when a name was given
    pub resolution: Option<Resolution>,
    /// The coordinate the cycle settled on, when any input produced one
    pub selection: Option<Selection>,
    /// Weather metrics or the failure banner, when a coordinate was selected
    pub weather: Option<WeatherOutcome>,
}

/// Terminal state of a cycle, for logs and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    /// No usable inputs; the page renders only the map and the search field
    Idle,
    /// Name resolution failed and no click supplied a coordinate
    NotFound,
    /// Metrics are on display
    Displayed,
    /// A coordinate was selected but the weather lookup failed
    FetchFailed,
}

impl CycleOutcome {
    /// Derive the terminal state of this cycle
    #[must_use]
    pub fn phase(&self) -> CyclePhase {
        match &self.weather {
            Some(WeatherOutcome::Displayed { .. }) => CyclePhase::Displayed,
            Some(WeatherOutcome::Failed { .. }) => CyclePhase::FetchFailed,
            None => match &self.resolution {
                Some(Resolution::NotFound { .. }) => CyclePhase::NotFound,
                _ => CyclePhase::Idle,
            },
        }
    }
}

/// Coordinates the resolver and the weather client for the page
#[derive(Debug, Clone)]
pub struct Dashboard {
    geocoding: GeocodingClient,
    weather: WeatherClient,
}

impl Dashboard {
    /// Build the dashboard services from configuration
    pub fn new(config: &MeteoMapConfig) -> Result<Self> {
        Ok(Self {
            geocoding: GeocodingClient::new(&config.geocoding)?,
            weather: WeatherClient::new(&config.weather)?,
        })
    }

    /// Run one interaction cycle
    ///
    /// Name resolution runs first when a non-blank name is present; a map
    /// click then overwrites the resolved coordinate; the weather fetch runs
    /// last, against whichever coordinate won.
    #[tracing::instrument(skip(self))]
    pub async fn run_cycle(&self, input: CycleInput) -> CycleOutcome {
        let mut outcome = CycleOutcome::default();

        let query = input
            .place_name
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty());

        if let Some(query) = query {
            match LocationResolver::resolve(&self.geocoding, query).await {
                Ok(place) => {
                    debug!("Resolved '{query}' to ({})", place.coordinate.format_rounded());
                    outcome.selection = Some(Selection {
                        coordinate: place.coordinate,
                        source: CoordinateSource::Search,
                    });
                    outcome.resolution = Some(Resolution::Found { place });
                }
                Err(err) => {
                    info!("Resolution of '{query}' failed: {err}");
                    outcome.resolution = Some(Resolution::NotFound {
                        message: err.user_message(),
                    });
                }
            }
        }

        // Last write wins: a click replaces whatever the search produced.
        if let Some(click) = input.map_click {
            outcome.selection = Some(Selection {
                coordinate: click,
                source: CoordinateSource::MapClick,
            });
        }

        if let Some(selection) = outcome.selection {
            outcome.weather = Some(match self.weather.current(selection.coordinate).await {
                Ok(reading) => WeatherOutcome::Displayed { reading },
                Err(err) => {
                    info!(
                        "Weather fetch for ({}) failed: {err}",
                        selection.coordinate.format_rounded()
                    );
                    WeatherOutcome::Failed {
                        message: err.user_message(),
                    }
                }
            });
        }

        info!("Cycle finished in phase {:?}", outcome.phase());
        outcome
    }
}
