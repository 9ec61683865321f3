use serde::Deserialize;

use crate::core::config::GeocoderConfig;
use crate::core::error::{AppError, Result};
use crate::shared::geo::Coordinate;

/// Importance score at or above which a result counts as High confidence
const HIGH_CONFIDENCE_IMPORTANCE: f64 = 0.4;

/// Importance score at or above which a result counts as Medium confidence
const MEDIUM_CONFIDENCE_IMPORTANCE: f64 = 0.2;

/// Nominatim API response structure
#[derive(Debug, Deserialize)]
pub struct NominatimResponse {
    #[allow(dead_code)]
    pub place_id: i64,
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    pub importance: Option<f64>,
}

/// Structured address to validate
#[derive(Debug, Clone)]
pub struct AddressQuery {
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: String,
}

/// How certain the geocoder is that the resolved point matches the address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    fn from_importance(importance: Option<f64>) -> Self {
        match importance {
            Some(i) if i >= HIGH_CONFIDENCE_IMPORTANCE => ConfidenceLevel::High,
            Some(i) if i >= MEDIUM_CONFIDENCE_IMPORTANCE => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }
}

/// A successfully resolved address
#[derive(Debug, Clone)]
pub struct ValidatedAddress {
    pub coordinate: Coordinate,
    pub display_name: String,
    pub confidence: ConfidenceLevel,
}

/// Client for validating addresses against a Nominatim endpoint
pub struct GeocoderClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeocoderClient {
    pub fn new(config: &GeocoderConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(config.user_agent.clone())
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.base_url.clone(),
        }
    }

    /// Resolve a structured address to coordinates.
    ///
    /// Returns `None` when the geocoder has no match at all; transport and
    /// decoding failures surface as `ExternalServiceError`.
    pub async fn validate_address(&self, query: &AddressQuery) -> Result<Option<ValidatedAddress>> {
        let params = [
            ("street", query.street.as_str()),
            ("city", query.city.as_str()),
            ("postalcode", query.zip.as_str()),
            ("country", query.country.as_str()),
            ("format", "json"),
            ("limit", "1"),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!("{}/search?{}", self.base_url, query_string);
        tracing::debug!(
            "Geocoding address: {}/{}/{} -> {}",
            query.street,
            query.city,
            query.country,
            url
        );

        let response = match self.execute_request(&url).await? {
            Some(r) => r,
            None => return Ok(None),
        };

        let latitude: f64 = response.lat.parse().map_err(|_| {
            AppError::ExternalServiceError("Geocoder returned a malformed latitude".to_string())
        })?;
        let longitude: f64 = response.lon.parse().map_err(|_| {
            AppError::ExternalServiceError("Geocoder returned a malformed longitude".to_string())
        })?;

        let coordinate = Coordinate::new(latitude, longitude).map_err(|_| {
            AppError::ExternalServiceError(format!(
                "Geocoder returned out-of-range coordinates: ({}, {})",
                latitude, longitude
            ))
        })?;

        Ok(Some(ValidatedAddress {
            coordinate,
            display_name: response.display_name,
            confidence: ConfidenceLevel::from_importance(response.importance),
        }))
    }

    /// Execute HTTP request to the geocoder and parse the response
    async fn execute_request(&self, url: &str) -> Result<Option<NominatimResponse>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Geocoder request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Geocoder request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Geocoder returned status: {}", response.status());
            return Ok(None);
        }

        let results: Vec<NominatimResponse> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse geocoder response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse geocoder response: {}", e))
        })?;

        Ok(results.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_from_importance() {
        assert_eq!(
            ConfidenceLevel::from_importance(Some(0.75)),
            ConfidenceLevel::High
        );
        assert_eq!(
            ConfidenceLevel::from_importance(Some(0.4)),
            ConfidenceLevel::High
        );
        assert_eq!(
            ConfidenceLevel::from_importance(Some(0.3)),
            ConfidenceLevel::Medium
        );
        assert_eq!(
            ConfidenceLevel::from_importance(Some(0.1)),
            ConfidenceLevel::Low
        );
        assert_eq!(
            ConfidenceLevel::from_importance(None),
            ConfidenceLevel::Low
        );
    }
}
