//! `MeteoMap` - Interactive world-map dashboard for current weather
//!
//! This library provides the building blocks of the dashboard: resolving
//! place names to coordinates, fetching the current weather for a
//! coordinate, and the per-interaction cycle that composes the two behind
//! the JSON API.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geocoding;
pub mod location_resolver;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::MeteoMapConfig;
pub use dashboard::{CycleInput, CycleOutcome, CyclePhase, Dashboard};
pub use error::MeteoMapError;
pub use geocoding::GeocodingClient;
pub use location_resolver::LocationResolver;
pub use models::{Coordinate, Place, WeatherReading};
pub use weather::WeatherClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MeteoMapError>;
