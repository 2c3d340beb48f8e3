//! Current-weather reading model and display methods

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One complete current-weather observation
///
/// All three metrics are mandatory; a reading with any of them missing is
/// never constructed. The observation time is the only optional part.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReading {
    /// Air temperature at 2 m above ground, in degrees Celsius
    pub temperature_c: f64,
    /// Relative humidity at 2 m above ground, in percent
    pub humidity_pct: f64,
    /// Precipitation amount in mm
    pub precipitation_mm: f64,
    /// Provider-local observation time, when reported in a parsable form
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherReading {
    /// Timestamp layout used by the weather provider, e.g. "2024-01-01T12:00"
    pub const OBSERVATION_TIME_FORMAT: &'static str = "%Y-%m-%dT%H:%M";

    /// Observation-time label for display, "N/A" when absent
    #[must_use]
    pub fn observed_at_label(&self) -> String {
        self.observed_at.map_or_else(
            || "N/A".to_string(),
            |observed_at| observed_at.format(Self::OBSERVATION_TIME_FORMAT).to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(observed_at: Option<NaiveDateTime>) -> WeatherReading {
        WeatherReading {
            temperature_c: 21.5,
            humidity_pct: 60.0,
            precipitation_mm: 0.0,
            observed_at,
        }
    }

    #[test]
    fn test_observed_at_label_formats_timestamp() {
        let observed_at =
            NaiveDateTime::parse_from_str("2024-01-01T12:00", WeatherReading::OBSERVATION_TIME_FORMAT)
                .unwrap();
        assert_eq!(reading(Some(observed_at)).observed_at_label(), "2024-01-01T12:00");
    }

    #[test]
    fn test_observed_at_label_defaults_to_na() {
        assert_eq!(reading(None).observed_at_label(), "N/A");
    }
}
