//! Session tokens for marketplace accounts.
//!
//! A token is an HS256 JWT issued by this service at login or registration.
//! It identifies the profile and records the role it held at issue time;
//! the admin gate never trusts that role and re-reads the profile instead.

use chrono::{Duration, Utc};
use ecotour_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `iss` claim stamped on every token; tokens from any other issuer are refused.
pub const TOKEN_ISSUER: &str = "ecotour-api";

const DEFAULT_SESSION_MINS: i64 = 60;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Profile id.
    pub sub: DbId,
    /// Role held when the token was issued.
    pub role: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// Per-token id, logged on rejection.
    pub jti: String,
}

impl Claims {
    fn for_profile(user_id: DbId, role: &str, lifetime: Duration) -> Self {
        let issued_at = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Session lifetime in minutes.
    pub access_token_expiry_mins: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_ACCESS_EXPIRY_MINS`
    /// (default 60).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or a non-numeric lifetime.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set to a non-empty value");

        let access_token_expiry_mins = match std::env::var("JWT_ACCESS_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_ACCESS_EXPIRY_MINS must be a whole number of minutes"),
            Err(_) => DEFAULT_SESSION_MINS,
        };

        Self {
            secret,
            access_token_expiry_mins,
        }
    }

    fn lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_mins)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation
    }
}

/// Issue a session token for profile `user_id` holding `role`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims::for_profile(user_id, role, config.lifetime());
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, issuer and expiry, then return the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )
    .map(|data| data.claims)
}
