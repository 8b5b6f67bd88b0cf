// document-backend/src/config/jwt.rs

use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JwtConfigError {
    #[error("Missing JWT secret key")]
    MissingSecretKey,

    #[error("Invalid JWT configuration: {0}")]
    Invalid(String),
}

/// 外部の認証基盤が発行するアクセストークンの検証設定
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, JwtConfigError> {
        let config = Self {
            secret_key: env::var("JWT_SECRET_KEY").map_err(|_| JwtConfigError::MissingSecretKey)?,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "document-backend".to_string()),
            audience: env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "document-backend-users".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), JwtConfigError> {
        if self.secret_key.len() < 32 {
            return Err(JwtConfigError::Invalid(
                "JWT secret key must be at least 32 characters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn for_testing() -> Self {
        Self {
            secret_key: "test-secret-key-that-is-at-least-32-characters-long".to_string(),
            issuer: "document-backend".to_string(),
            audience: "document-backend-users".to_string(),
        }
    }
}
