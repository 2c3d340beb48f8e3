//! Error types and handling for the `MeteoMap` dashboard

use thiserror::Error;

/// Main error type for the `MeteoMap` dashboard
#[derive(Error, Debug)]
pub enum MeteoMapError {
    /// Place-name resolution failed or produced no usable match
    #[error("Resolution error: {message}")]
    Resolution { message: String },

    /// Weather lookup failed or returned an unusable payload
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl MeteoMapError {
    /// Create a new resolution error
    pub fn resolution<S: Into<String>>(message: S) -> Self {
        Self::Resolution {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message, suitable for the dashboard banners
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            MeteoMapError::Resolution { .. } => "Location not found. Try again.".to_string(),
            MeteoMapError::Fetch { .. } => "Could not fetch weather data.".to_string(),
            MeteoMapError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            MeteoMapError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let resolution_err = MeteoMapError::resolution("no results for query");
        assert!(matches!(resolution_err, MeteoMapError::Resolution { .. }));

        let fetch_err = MeteoMapError::fetch("failed to fetch data");
        assert!(matches!(fetch_err, MeteoMapError::Fetch { .. }));

        let validation_err = MeteoMapError::validation("invalid coordinates");
        assert!(matches!(validation_err, MeteoMapError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let resolution_err = MeteoMapError::resolution("test");
        assert_eq!(resolution_err.user_message(), "Location not found. Try again.");

        let fetch_err = MeteoMapError::fetch("test");
        assert_eq!(fetch_err.user_message(), "Could not fetch weather data.");

        let validation_err = MeteoMapError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_internal_messages_stay_out_of_banners() {
        let fetch_err = MeteoMapError::fetch("HTTP status 500 from upstream");
        assert!(!fetch_err.user_message().contains("500"));
    }
}
