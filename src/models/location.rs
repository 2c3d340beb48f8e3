//! Location models: validated coordinates and geocoding matches

use serde::{Deserialize, Serialize};

use crate::{MeteoMapError, Result};

/// A validated point on Earth
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range and non-finite values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(MeteoMapError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(MeteoMapError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format as the banner string, rounded to two decimal places
    #[must_use]
    pub fn format_rounded(&self) -> String {
        format!("{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

/// A geocoding match for a place-name query
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Place {
    /// Place name as reported by the geocoding provider
    pub name: String,
    /// Country name, when the provider reports one
    pub country: Option<String>,
    /// First-level administrative area (state, region)
    pub admin1: Option<String>,
    /// Validated coordinates of the match
    pub coordinate: Coordinate,
}

impl Place {
    /// Label for the confirmation banner, e.g. "Tokyo, Japan"
    #[must_use]
    pub fn display_name(&self) -> String {
        let suffix = self
            .admin1
            .as_deref()
            .or(self.country.as_deref())
            .filter(|part| !part.is_empty() && *part != self.name);

        match suffix {
            Some(part) => format!("{}, {}", self.name, part),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(35.6895, 139.6917)]
    fn test_coordinate_accepts_valid_ranges(#[case] latitude: f64, #[case] longitude: f64) {
        let coordinate = Coordinate::new(latitude, longitude).unwrap();
        assert_eq!(coordinate.latitude, latitude);
        assert_eq!(coordinate.longitude, longitude);
    }

    #[rstest]
    #[case(90.01, 0.0)]
    #[case(-95.0, 0.0)]
    #[case(0.0, 180.5)]
    #[case(0.0, -200.0)]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn test_coordinate_rejects_invalid_values(#[case] latitude: f64, #[case] longitude: f64) {
        let result = Coordinate::new(latitude, longitude);
        assert!(matches!(result, Err(MeteoMapError::Validation { .. })));
    }

    #[test]
    fn test_format_rounded() {
        let coordinate = Coordinate::new(48.8566, 2.3522).unwrap();
        assert_eq!(coordinate.format_rounded(), "48.86, 2.35");

        let origin = Coordinate::new(10.0, 20.0).unwrap();
        assert_eq!(origin.format_rounded(), "10.00, 20.00");
    }

    #[test]
    fn test_display_name_prefers_admin1() {
        let place = Place {
            name: "Springfield".to_string(),
            country: Some("United States".to_string()),
            admin1: Some("Illinois".to_string()),
            coordinate: Coordinate::new(39.8, -89.6).unwrap(),
        };
        assert_eq!(place.display_name(), "Springfield, Illinois");
    }

    #[test]
    fn test_display_name_falls_back_to_country() {
        let place = Place {
            name: "Tokyo".to_string(),
            country: Some("Japan".to_string()),
            admin1: None,
            coordinate: Coordinate::new(35.6895, 139.6917).unwrap(),
        };
        assert_eq!(place.display_name(), "Tokyo, Japan");
    }

    #[test]
    fn test_display_name_skips_redundant_suffix() {
        let place = Place {
            name: "Singapore".to_string(),
            country: Some("Singapore".to_string()),
            admin1: None,
            coordinate: Coordinate::new(1.29, 103.85).unwrap(),
        };
        assert_eq!(place.display_name(), "Singapore");
    }
}
