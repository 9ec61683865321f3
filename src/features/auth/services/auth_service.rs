use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, AuthUserDto, CredentialsDto, RegisterRequestDto};
use crate::features::auth::services::TokenService;
use crate::features::users::models::CreateUser;
use crate::features::users::services::UserService;
use crate::modules::geocoder::{AddressQuery, ConfidenceLevel, GeocoderClient};

/// Service orchestrating registration and login
pub struct AuthService {
    user_service: Arc<UserService>,
    geocoder: Arc<GeocoderClient>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        user_service: Arc<UserService>,
        geocoder: Arc<GeocoderClient>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_service,
            geocoder,
            token_service,
        }
    }

    /// Register a new account.
    ///
    /// The address must geocode with high confidence; the resolved
    /// coordinates are stored on the profile and later copied onto every
    /// request the user creates.
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let address = AddressQuery {
            street: dto.street.clone(),
            city: dto.city.clone(),
            zip: dto.zip.clone(),
            country: dto.country.clone(),
        };

        let validated = self
            .geocoder
            .validate_address(&address)
            .await?
            .filter(|v| v.confidence == ConfidenceLevel::High)
            .ok_or_else(|| AppError::FailedDependency("Address is invalid".to_string()))?;

        tracing::debug!("Address resolved to: {}", validated.display_name);

        let password_hash = hash_password(&dto.password)?;

        let user = self
            .user_service
            .create(&CreateUser {
                email: dto.email,
                password_hash,
                first_name: dto.first_name,
                last_name: dto.last_name,
                street: dto.street,
                city: dto.city,
                zip: dto.zip,
                country: dto.country,
                latitude: validated.coordinate.latitude(),
                longitude: validated.coordinate.longitude(),
            })
            .await?;

        let issued = self.token_service.issue(user.id, &user.email, None)?;

        Ok(AuthResponseDto {
            token: issued.token,
            valid_until: issued.valid_until,
            user: AuthUserDto {
                id: user.id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
            },
        })
    }

    /// Authenticate with email and password
    pub async fn login(&self, dto: CredentialsDto) -> Result<AuthResponseDto> {
        let user = self
            .user_service
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(&dto.password, &user.password_hash) {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let issued = self
            .token_service
            .issue(user.id, &user.email, dto.minutes_valid)?;

        Ok(AuthResponseDto {
            token: issued.token,
            valid_until: issued.valid_until,
            user: AuthUserDto {
                id: user.id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
            },
        })
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();

        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
