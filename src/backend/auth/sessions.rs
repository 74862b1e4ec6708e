/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation. The signing
 * secret and token lifetime come from `ServerConfig` and travel in
 * `AppState` as `JwtSettings`.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::shared::UserId;

/// Token expires in 30 days unless configured otherwise
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username at issue time
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    /// Parse the subject back into a user id
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }
}

/// Signing settings shared by token issuance and verification
#[derive(Clone)]
pub struct JwtSettings {
    secret: String,
    ttl_secs: u64,
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `settings` - Signing secret and lifetime
/// * `user_id` - User ID
/// * `username` - Username
///
/// # Returns
/// JWT token string
pub fn create_token(
    settings: &JwtSettings,
    user_id: UserId,
    username: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_secs();

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: now + settings.ttl_secs,
        iat: now,
    };

    let key = EncodingKey::from_secret(settings.secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
///
/// # Returns
/// Decoded claims or error (bad signature, expired, malformed)
pub fn verify_token(settings: &JwtSettings, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(settings.secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}
