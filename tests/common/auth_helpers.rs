//! Authentication test helpers
//!
//! Provides utilities for creating test users and generating tokens.

use sqlx::PgPool;
use uuid::Uuid;

use social_media_api::backend::auth::sessions::{create_token, JwtSettings};
use social_media_api::backend::auth::users::create_user;
use social_media_api::shared::UserId;

/// Signing secret shared by test servers and test tokens
pub const TEST_JWT_SECRET: &str = "test-secret";

/// Test user credentials
pub struct TestUser {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub token: String,
}

pub fn test_jwt_settings() -> JwtSettings {
    JwtSettings::new(TEST_JWT_SECRET, 3600)
}

/// Generate a test JWT token
pub fn generate_test_token(user_id: UserId, username: &str) -> String {
    create_token(&test_jwt_settings(), user_id, username).expect("Failed to generate test token")
}

/// Create a test user in the database
pub async fn create_test_user(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<TestUser, Box<dyn std::error::Error>> {
    // Hash with the minimum cost; these users only live for one test
    let password_hash = bcrypt::hash(password, 4)?;

    let user = create_user(pool, username, "", "", &password_hash).await?;
    let token = generate_test_token(user.id, &user.username);

    Ok(TestUser {
        id: user.id,
        username: user.username,
        password: password.to_string(),
        token,
    })
}

/// Create a test user with a unique username
pub async fn create_unique_test_user(
    pool: &PgPool,
) -> Result<TestUser, Box<dyn std::error::Error>> {
    let username = unique_username();
    create_test_user(pool, &username, "test_password_123").await
}

pub fn unique_username() -> String {
    format!("user_{}", &Uuid::new_v4().simple().to_string()[..12])
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
