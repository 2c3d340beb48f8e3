//! Place-Name Resolution Module
//!
//! This module turns free-text place names from the search field into the
//! first geocoding match, following the provider's ranking.

use crate::geocoding::GeocodingClient;
use crate::models::Place;
use crate::{MeteoMapError, Result};
use tracing::debug;

/// Service for resolving place names to coordinates
pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a place name into its best geocoding match
    ///
    /// The query must be non-blank. The first provider result wins; no
    /// re-ranking is applied.
    pub async fn resolve(client: &GeocodingClient, query: &str) -> Result<Place> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MeteoMapError::validation("Location name cannot be empty"));
        }

        debug!("Geocoding place name: {query}");

        let matches = client.search(query).await?;
        let Some(place) = matches.into_iter().next() else {
            return Err(MeteoMapError::resolution(format!("Location not found: {query}")));
        };

        debug!(
            "Found location: {} ({})",
            place.display_name(),
            place.coordinate.format_rounded()
        );

        Ok(place)
    }
}
