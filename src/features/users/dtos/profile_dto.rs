use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::User;
use crate::shared::validation::ZIP_REGEX;

/// Response DTO for the current user's profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponseDto {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfileResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            street: u.street,
            city: u.city,
            zip: u.zip,
            country: u.country,
            latitude: u.latitude,
            longitude: u.longitude,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Request DTO for replacing the profile (names and address).
/// An address change re-geocodes and replaces the stored coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 100, message = "Street must be 1-100 characters"))]
    pub street: String,

    #[validate(length(min = 1, max = 50, message = "City must be 1-50 characters"))]
    pub city: String,

    #[validate(
        length(min = 1, max = 10, message = "Zip must be 1-10 characters"),
        regex(path = *ZIP_REGEX, message = "Invalid zip code")
    )]
    pub zip: String,

    #[validate(length(min = 1, max = 56, message = "Country must be 1-56 characters"))]
    pub country: String,
}
