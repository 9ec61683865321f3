use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Claims;

/// A signed token together with its expiry instant
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub valid_until: DateTime<Utc>,
}

/// Service that signs JWT access tokens for authenticated users
pub struct TokenService {
    config: AuthConfig,
    encoding_key: EncodingKey,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
        }
    }

    /// Sign a token for the user.
    ///
    /// `minutes_valid` lets a login bound its own session lifetime; it is
    /// rejected when non-positive and capped at the configured maximum.
    pub fn issue(
        &self,
        user_id: Uuid,
        email: &str,
        minutes_valid: Option<i64>,
    ) -> Result<IssuedToken> {
        let ttl_secs = match minutes_valid {
            Some(minutes) if minutes <= 0 => {
                return Err(AppError::Validation(
                    "minutes_valid must be positive".to_string(),
                ));
            }
            Some(minutes) => (minutes as u64 * 60).min(self.config.max_token_ttl.as_secs()),
            None => self.config.token_ttl.as_secs(),
        };

        let now = Utc::now();
        let valid_until = now + ChronoDuration::seconds(ttl_secs as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp() as u64,
            nbf: now.timestamp() as u64,
            exp: valid_until.timestamp() as u64,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken { token, valid_until })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "0123456789abcdef0123456789abcdef".to_string(),
            issuer: "voitheia-core".to_string(),
            audience: "voitheia-app".to_string(),
            token_ttl: Duration::from_secs(3600),
            max_token_ttl: Duration::from_secs(7200),
            jwt_leeway: Duration::from_secs(60),
        }
    }

    #[test]
    fn test_default_ttl_applied() {
        let service = TokenService::new(test_config());
        let issued = service.issue(Uuid::new_v4(), "a@b.c", None).unwrap();

        let remaining = (issued.valid_until - Utc::now()).num_seconds();
        assert!(remaining > 3500 && remaining <= 3600);
    }

    #[test]
    fn test_requested_lifetime_capped_at_maximum() {
        let service = TokenService::new(test_config());
        let issued = service
            .issue(Uuid::new_v4(), "a@b.c", Some(10_000))
            .unwrap();

        let remaining = (issued.valid_until - Utc::now()).num_seconds();
        assert!(remaining <= 7200);
    }

    #[test]
    fn test_non_positive_lifetime_rejected() {
        let service = TokenService::new(test_config());
        assert!(service.issue(Uuid::new_v4(), "a@b.c", Some(0)).is_err());
        assert!(service.issue(Uuid::new_v4(), "a@b.c", Some(-5)).is_err());
    }
}
