use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::requests::models::{HelpRequest, NearbyRequest, RequestStatus};
use crate::shared::constants::{DEFAULT_NEARBY_AMOUNT, DEFAULT_NEARBY_RADIUS_METERS};

/// Request DTO for creating a help request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRequestDto {
    #[validate(length(min = 1, max = 100, message = "Topic must be 1-100 characters"))]
    pub topic: String,

    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,
}

/// Response DTO carrying the id of a freshly created request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRequestResponseDto {
    pub id: i64,
}

/// Response DTO for a help request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestResponseDto {
    pub id: i64,
    pub requestor_id: Uuid,
    pub acceptor_id: Option<Uuid>,
    pub topic: String,
    pub description: String,
    pub status: RequestStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HelpRequest> for RequestResponseDto {
    fn from(r: HelpRequest) -> Self {
        Self {
            id: r.id,
            requestor_id: r.requestor_id,
            acceptor_id: r.acceptor_id,
            topic: r.topic,
            description: r.description,
            status: r.status,
            latitude: r.latitude,
            longitude: r.longitude,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Response DTO for a nearby-search hit: the request plus its distance
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NearbyRequestDto {
    #[serde(flatten)]
    pub request: RequestResponseDto,
    pub distance_meters: f64,
}

impl From<NearbyRequest> for NearbyRequestDto {
    fn from(n: NearbyRequest) -> Self {
        Self {
            request: n.request.into(),
            distance_meters: n.distance_meters,
        }
    }
}

/// Query parameters for the nearby search
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NearbyQuery {
    /// Latitude of the search center in degrees
    pub latitude: f64,

    /// Longitude of the search center in degrees
    pub longitude: f64,

    /// How many requests to retrieve (default: 10)
    #[serde(default = "default_nearby_amount")]
    #[param(minimum = 1)]
    pub amount: i64,

    /// Search radius in meters, must be positive (default: 2000)
    #[serde(default = "default_nearby_radius")]
    pub meters_perimeter: f64,
}

fn default_nearby_amount() -> i64 {
    DEFAULT_NEARBY_AMOUNT
}

fn default_nearby_radius() -> f64 {
    DEFAULT_NEARBY_RADIUS_METERS
}

/// Request DTO for moving a request along its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRequestStatusDto {
    pub status: RequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nearby_query_defaults() {
        let query: NearbyQuery =
            serde_json::from_value(json!({"latitude": 52.52, "longitude": 13.405})).unwrap();

        assert_eq!(query.amount, 10);
        assert!((query.meters_perimeter - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nearby_query_explicit_values() {
        let query: NearbyQuery = serde_json::from_value(json!({
            "latitude": 52.52,
            "longitude": 13.405,
            "amount": 3,
            "meters_perimeter": 500.0
        }))
        .unwrap();

        assert_eq!(query.amount, 3);
        assert!((query.meters_perimeter - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_create_request_dto_rejects_empty_topic() {
        let dto = CreateRequestDto {
            topic: String::new(),
            description: "please help carry groceries".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_request_dto_valid() {
        let dto = CreateRequestDto {
            topic: "Groceries".to_string(),
            description: "please help carry groceries".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
