use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::ZIP_REGEX;

/// Request DTO for user registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

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

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CredentialsDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Optional token lifetime in minutes, capped by server configuration
    pub minutes_valid: Option<i64>,
}

/// Response DTO for authentication (register/login)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// Signed JWT bearer token
    pub token: String,
    /// Instant the token expires (UTC)
    pub valid_until: DateTime<Utc>,
    /// Authenticated user info
    pub user: AuthUserDto,
}

/// User info included in auth response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    fn valid_register_dto() -> RegisterRequestDto {
        RegisterRequestDto {
            email: SafeEmail().fake(),
            password: "correct horse battery".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            street: "Unter den Linden 1".to_string(),
            city: "Berlin".to_string(),
            zip: "10117".to_string(),
            country: "Germany".to_string(),
        }
    }

    #[test]
    fn test_register_dto_valid() {
        assert!(valid_register_dto().validate().is_ok());
    }

    #[test]
    fn test_register_dto_rejects_short_password() {
        let mut dto = valid_register_dto();
        dto.password = "short".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_register_dto_rejects_bad_email() {
        let mut dto = valid_register_dto();
        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_register_dto_rejects_bad_zip() {
        let mut dto = valid_register_dto();
        dto.zip = "10--117".to_string();
        assert!(dto.validate().is_err());
    }
}
