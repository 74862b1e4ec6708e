/**
 * Token Handler
 *
 * Implements POST /api/token/, exchanging a username and password for a
 * JWT access token.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown users and wrong passwords both return 401 (no user enumeration)
 * - Passwords are never logged or returned in responses
 */
use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{TokenRequest, TokenResponse};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Token handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If database query or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/token/ HTTP/1.1
/// Content-Type: application/json
///
/// {"username": "alice", "password": "securepassword"}
/// ```
///
/// # Example Response
///
/// ```json
/// {"access": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."}
/// ```
pub async fn obtain_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let pool = state.pool()?;
    tracing::info!("Token request for: {}", request.username);

    let user = get_user_by_username(pool, &request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.username);
            BackendError::Unauthorized
        })?;

    if !verify_password(&request.password, &user.password_hash).await? {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::Unauthorized);
    }

    let access = create_token(&state.jwt, user.id, &user.username)?;

    tracing::info!("Issued token for {} ({})", user.username, user.id);

    Ok(Json(TokenResponse { access }))
}
