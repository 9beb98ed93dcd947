//! Application Configuration
//!
//! All configuration values are loaded from environment variables once at
//! startup and passed explicitly into the services that need them. Business
//! logic never reads the environment directly.

use crate::error::AuthError;
use std::env;

/// Ten hours, the fixed session lifetime.
const DEFAULT_TOKEN_EXPIRATION: i64 = 36_000;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JWT secret key for signing session tokens (from JWT_SECRET env var)
    pub jwt_secret: String,

    /// Secret used to derive product-key proofs (from PRODUCT_KEY_SECRET env var)
    pub product_key_secret: String,

    /// Session token expiration in seconds (from JWT_EXPIRATION env var)
    pub token_expiration: i64,

    /// PostgreSQL connection string (from DATABASE_URL env var)
    pub database_url: String,

    /// Socket address to bind (from BIND_ADDR env var)
    pub bind_addr: String,

    /// Argon2 memory cost in KiB (from ARGON2_MEMORY_COST env var)
    pub argon2_memory_cost: u32,

    /// Argon2 time cost (iterations) (from ARGON2_TIME_COST env var)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (from ARGON2_PARALLELISM env var)
    pub argon2_parallelism: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing `JWT_SECRET` or `PRODUCT_KEY_SECRET` is a fatal startup
    /// condition and reported as a `Config` error.
    pub fn from_env() -> Result<Self, AuthError> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AuthError::Config("JWT_SECRET must be set".to_string()))?;

        let product_key_secret = env::var("PRODUCT_KEY_SECRET")
            .map_err(|_| AuthError::Config("PRODUCT_KEY_SECRET must be set".to_string()))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AuthError::Config("DATABASE_URL must be set".to_string()))?;

        Ok(Self {
            jwt_secret,
            product_key_secret,
            database_url,

            token_expiration: env::var("JWT_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_EXPIRATION),

            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),

            argon2_memory_cost: env::var("ARGON2_MEMORY_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(65536), // 64 MiB

            argon2_time_cost: env::var("ARGON2_TIME_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),

            argon2_parallelism: env::var("ARGON2_PARALLELISM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.jwt_secret.len() < 32 {
            return Err(AuthError::Config(
                "JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }

        if self.product_key_secret.len() < 16 {
            return Err(AuthError::Config(
                "PRODUCT_KEY_SECRET must be at least 16 characters".to_string(),
            ));
        }

        if self.token_expiration <= 0 {
            return Err(AuthError::Config(
                "JWT_EXPIRATION must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            jwt_secret: "a".repeat(32),
            product_key_secret: "b".repeat(16),
            token_expiration: 36_000,
            database_url: "postgres://localhost/estately".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            argon2_memory_cost: 65536,
            argon2_time_cost: 3,
            argon2_parallelism: 4,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_jwt_secret() {
        let mut cfg = config();
        cfg.jwt_secret = "short".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_config_validation_short_product_key_secret() {
        let mut cfg = config();
        cfg.product_key_secret = "short".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_expiration() {
        let mut cfg = config();
        cfg.token_expiration = 0;
        assert!(cfg.validate().is_err());
    }
}
