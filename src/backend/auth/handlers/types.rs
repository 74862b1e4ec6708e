/**
 * Authentication Handler Types
 *
 * Request and response types used by the token and user handlers.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;
use crate::shared::UserId;

/// Token request (POST /api/token/)
#[derive(Deserialize, Serialize, Debug)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Token response
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    /// JWT access token
    pub access: String,
}

/// Registration request (POST /api/v1/users/)
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    /// Write-only; hashed before storage
    pub password: String,
}

/// Partial update (PATCH/PUT /api/v1/users/{id}/)
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub password: Option<String>,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub bio: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            bio: user.bio,
        }
    }
}
