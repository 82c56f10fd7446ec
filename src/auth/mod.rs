use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::database::models::user::{ROLE_ADMIN, ROLE_USER};

/// Upper bound on token lifetime (ten years); longer requests are clamped
pub const MAX_EXPIRY_HOURS: u64 = 24 * 366 * 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the principal
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, role: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let hours = i64::try_from(expiry_hours.min(MAX_EXPIRY_HOURS)).unwrap_or(0);
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            sub: username.into(),
            role: role.into(),
            exp,
            iat: now.timestamp(),
        }
    }

    pub fn user(username: impl Into<String>, expiry_hours: u64) -> Self {
        Self::new(username, ROLE_USER, expiry_hours)
    }

    pub fn admin(username: impl Into<String>, expiry_hours: u64) -> Self {
        Self::new(username, ROLE_ADMIN, expiry_hours)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("JWT secret not configured")]
    InvalidSecret,
}

pub fn generate_jwt(claims: &Claims, security: &SecurityConfig) -> Result<String, JwtError> {
    let secret = &security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str, security: &SecurityConfig) -> Result<Claims, JwtError> {
    let secret = &security.jwt_secret;

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}
