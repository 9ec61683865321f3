use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub geocoder: GeocoderConfig,
    pub request_timeout: RequestTimeoutConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub token_ttl: Duration,
    pub max_token_ttl: Duration,
    pub jwt_leeway: Duration,
}

/// Geocoder endpoint used to validate registration addresses
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
}

/// Background sweep that moves stale open requests to `timeout`
#[derive(Debug, Clone)]
pub struct RequestTimeoutConfig {
    pub max_open_age: Duration,
    pub sweep_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            geocoder: GeocoderConfig::from_env()?,
            request_timeout: RequestTimeoutConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    // Default values for JWT authentication
    const DEFAULT_TOKEN_TTL_MINUTES: u64 = 60; // 1 hour
    const DEFAULT_MAX_TOKEN_TTL_MINUTES: u64 = 60 * 24; // 1 day
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60; // 1 minute

    pub fn from_env() -> Result<Self, String> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET environment variable is required".to_string())?;
        if secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 bytes".to_string());
        }

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "voitheia-core".to_string());
        let audience = env::var("JWT_AUDIENCE").unwrap_or_else(|_| "voitheia-app".to_string());

        let token_ttl_minutes = env::var("JWT_TTL_MINUTES")
            .unwrap_or_else(|_| Self::DEFAULT_TOKEN_TTL_MINUTES.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_TTL_MINUTES must be a valid number".to_string())?;

        let max_token_ttl_minutes = env::var("JWT_MAX_TTL_MINUTES")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_TOKEN_TTL_MINUTES.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_MAX_TTL_MINUTES must be a valid number".to_string())?;

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            secret,
            issuer,
            audience,
            token_ttl: Duration::from_secs(token_ttl_minutes * 60),
            max_token_ttl: Duration::from_secs(max_token_ttl_minutes * 60),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }
}

impl GeocoderConfig {
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("GEOCODER_BASE_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let user_agent = env::var("GEOCODER_USER_AGENT")
            .unwrap_or_else(|_| "VoitheiaCore/1.0 (help-request-matching)".to_string());

        Ok(Self {
            base_url,
            user_agent,
        })
    }
}

impl RequestTimeoutConfig {
    const DEFAULT_MAX_OPEN_AGE_HOURS: u64 = 24;
    const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300; // 5 minutes

    pub fn from_env() -> Result<Self, String> {
        let max_open_age_hours = env::var("REQUEST_MAX_OPEN_AGE_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_OPEN_AGE_HOURS.to_string())
            .parse::<u64>()
            .map_err(|_| "REQUEST_MAX_OPEN_AGE_HOURS must be a valid number".to_string())?;

        let sweep_interval_secs = env::var("REQUEST_TIMEOUT_SWEEP_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "REQUEST_TIMEOUT_SWEEP_SECS must be a valid number".to_string())?;

        Ok(Self {
            max_open_age: Duration::from_secs(max_open_age_hours * 3600),
            sweep_interval: Duration::from_secs(sweep_interval_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Voitheia API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for Voitheia".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
