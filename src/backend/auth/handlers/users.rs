/**
 * User Handlers
 *
 * CRUD endpoints for user accounts under /api/v1/users/.
 *
 * # Access
 *
 * - Registration is open to anonymous callers
 * - Listing and retrieval require authentication
 * - Updates and deletion are limited to the account owner
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::password::hash_password;
use crate::backend::auth::handlers::types::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::backend::auth::users::{self, is_unique_violation, UserChanges};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{SharedError, UserId};

/// Register a new user (POST /api/v1/users/)
///
/// # Errors
///
/// * `400 Bad Request` - Blank username/password or username already taken
/// * `503 Service Unavailable` - If database is not configured
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    let pool = state.pool()?;

    SharedError::require_non_blank("username", &request.username)?;
    SharedError::require_non_blank("password", &request.password)?;

    let password_hash = hash_password(&request.password).await?;

    let user = users::create_user(
        pool,
        request.username.trim(),
        &request.email,
        &request.bio,
        &password_hash,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::validation("username", "A user with that username already exists.")
        } else {
            e.into()
        }
    })?;

    tracing::info!("User registered: {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// List users (GET /api/v1/users/)
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
) -> Result<Json<Vec<UserResponse>>, BackendError> {
    let pool = state.pool()?;

    let users = users::list_users(pool).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Retrieve a user (GET /api/v1/users/{id}/)
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserResponse>, BackendError> {
    let pool = state.pool()?;

    let user = users::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("user"))?;

    Ok(Json(user.into()))
}

/// Update your own account (PATCH/PUT /api/v1/users/{id}/)
///
/// # Errors
///
/// * `403 Forbidden` - The account belongs to somebody else
/// * `404 Not Found` - Unknown user id
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<UserId>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, BackendError> {
    let pool = state.pool()?;
    ensure_self(&caller, user_id)?;

    if let Some(username) = &request.username {
        SharedError::require_non_blank("username", username)?;
    }

    let password_hash = match &request.password {
        Some(password) => {
            SharedError::require_non_blank("password", password)?;
            Some(hash_password(password).await?)
        }
        None => None,
    };

    let changes = UserChanges {
        username: request.username.map(|username| username.trim().to_string()),
        email: request.email,
        bio: request.bio,
        password_hash,
    };

    let user = users::update_user(pool, user_id, changes)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::validation("username", "A user with that username already exists.")
            } else {
                e.into()
            }
        })?
        .ok_or_else(|| BackendError::not_found("user"))?;

    Ok(Json(user.into()))
}

/// Delete your own account (DELETE /api/v1/users/{id}/)
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<StatusCode, BackendError> {
    let pool = state.pool()?;
    ensure_self(&caller, user_id)?;

    if !users::delete_user(pool, user_id).await? {
        return Err(BackendError::not_found("user"));
    }

    // The account is gone; so are its sessions.
    state.notifications.close_user(user_id);
    tracing::info!("User deleted: {}", user_id);

    Ok(StatusCode::NO_CONTENT)
}

fn ensure_self(
    caller: &crate::backend::middleware::AuthenticatedUser,
    user_id: UserId,
) -> Result<(), BackendError> {
    if caller.user_id != user_id {
        return Err(BackendError::forbidden("You can only modify your own account."));
    }
    Ok(())
}
