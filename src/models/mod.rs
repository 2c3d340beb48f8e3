//! Data models for the MeteoMap dashboard
//!
//! This module contains the core domain models organized by concern:
//! - Location: Validated coordinates and geocoding matches
//! - Weather: The current-weather reading shown on the dashboard

pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{Coordinate, Place};
pub use weather::WeatherReading;
