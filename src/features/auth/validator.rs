use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use std::time::Duration;
use uuid::Uuid;

use super::model::{AuthenticatedUser, Claims};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;

pub struct JwtValidator {
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(secret: &str, issuer: String, audience: String, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.secret,
            config.issuer.clone(),
            config.audience.clone(),
            config.jwt_leeway,
        )
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        // Validate algorithm from header
        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        // Setup validation
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true; // Validate not-before claim

        // Decode and validate token
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Auth("Token subject is not a valid user id".to_string()))?;

        Ok(AuthenticatedUser {
            id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::features::auth::services::TokenService;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "0123456789abcdef0123456789abcdef".to_string(),
            issuer: "voitheia-core".to_string(),
            audience: "voitheia-app".to_string(),
            token_ttl: Duration::from_secs(3600),
            max_token_ttl: Duration::from_secs(86400),
            jwt_leeway: Duration::from_secs(60),
        }
    }

    #[test]
    fn test_issued_token_round_trips() {
        let config = test_config();
        let issuer = TokenService::new(config.clone());
        let validator = JwtValidator::from_config(&config);

        let user_id = Uuid::new_v4();
        let issued = issuer
            .issue(user_id, "alice@example.com", None)
            .expect("token should issue");

        let user = validator
            .validate_token(&issued.token)
            .expect("token should validate");

        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let config = test_config();
        let issuer = TokenService::new(config.clone());

        let mut other = test_config();
        other.audience = "someone-else".to_string();
        let validator = JwtValidator::from_config(&other);

        let issued = issuer
            .issue(Uuid::new_v4(), "alice@example.com", None)
            .unwrap();

        assert!(validator.validate_token(&issued.token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = test_config();
        let issuer = TokenService::new(config.clone());
        let validator = JwtValidator::from_config(&config);

        let issued = issuer
            .issue(Uuid::new_v4(), "alice@example.com", None)
            .unwrap();
        let mut tampered = issued.token;
        tampered.push('x');

        assert!(validator.validate_token(&tampered).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let validator = JwtValidator::from_config(&test_config());
        assert!(validator.validate_token("not-a-token").is_err());
    }
}
