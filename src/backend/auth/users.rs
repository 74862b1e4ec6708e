/**
 * User Model and Database Operations
 *
 * This module handles user rows and their database operations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::shared::UserId;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: UserId,
    /// Username (unique)
    pub username: String,
    /// User email address (may be empty)
    pub email: String,
    /// Free-form profile text
    pub bio: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Changes applied by `update_user`; `None` leaves the column untouched
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub password_hash: Option<String>,
}

/// Create a new user
///
/// # Returns
/// Created user, or a unique-violation error when the username is taken
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    bio: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, bio, password_hash, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, username, email, bio, password_hash, created_at
        "#
    )
    .bind(username)
    .bind(email)
    .bind(bio)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, bio, password_hash, created_at
        FROM users
        WHERE username = $1
        "#
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user_by_id(
    pool: &PgPool,
    id: UserId,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, bio, password_hash, created_at
        FROM users
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// List all users, oldest first
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, bio, password_hash, created_at
        FROM users
        ORDER BY id
        "#
    )
    .fetch_all(pool)
    .await
}

/// Apply a partial update
///
/// # Returns
/// Updated user or None if not found
pub async fn update_user(
    pool: &PgPool,
    id: UserId,
    changes: UserChanges,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET username = COALESCE($2, username),
            email = COALESCE($3, email),
            bio = COALESCE($4, bio),
            password_hash = COALESCE($5, password_hash)
        WHERE id = $1
        RETURNING id, username, email, bio, password_hash, created_at
        "#
    )
    .bind(id)
    .bind(changes.username)
    .bind(changes.email)
    .bind(changes.bio)
    .bind(changes.password_hash)
    .fetch_optional(pool)
    .await
}

/// Delete a user (posts, comments and likes cascade)
///
/// # Returns
/// Whether a row was deleted
pub async fn delete_user(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Whether a database error is a unique-constraint violation
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}
