/**
 * Identity Middleware
 *
 * Resolves the caller's identity once per request and stores it in the
 * request extensions. Handlers then pick it up through one of two
 * extractors:
 *
 * - `Identity` never rejects; anonymous callers simply carry no user
 * - `AuthUser` rejects anonymous callers with 401 Unauthorized
 *
 * # Token Sources
 *
 * 1. `Authorization: Bearer <token>` header
 * 2. `?token=<token>` query parameter (browsers cannot set headers on a
 *    WebSocket handshake)
 *
 * A missing, malformed or expired token resolves to anonymous. So does a
 * token whose user no longer exists, when a database is configured.
 */

use axum::{
    extract::{FromRequestParts, Query, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Uri},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use sqlx::PgPool;
use std::convert::Infallible;

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::UserId;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Resolved identity of the caller; `None` means anonymous
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity(pub Option<AuthenticatedUser>);

impl Identity {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.0.as_ref().map(|user| user.user_id)
    }

    pub fn username(&self) -> Option<&str> {
        self.0.as_ref().map(|user| user.username.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Pull a raw token out of the request, header first
pub fn extract_token(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let from_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = from_header {
        return Some(token.to_string());
    }

    Query::<TokenQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(query)| query.token)
        .filter(|token| !token.is_empty())
}

/// Identity middleware
///
/// This middleware:
/// 1. Extracts a token from the Authorization header or `token` query
/// 2. Verifies the token
/// 3. Confirms the user still exists (when a database is configured)
/// 4. Attaches the resulting `Identity` to request extensions
///
/// Never rejects; authorization is left to the handlers.
pub async fn resolve_identity(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = match extract_token(request.headers(), request.uri()) {
        Some(token) => identify(&app_state, &token).await,
        None => Identity::anonymous(),
    };

    request.extensions_mut().insert(identity);

    next.run(request).await
}

async fn identify(app_state: &AppState, token: &str) -> Identity {
    let claims = match verify_token(&app_state.jwt, token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Invalid token: {:?}", e);
            return Identity::anonymous();
        }
    };

    let Some(user_id) = claims.user_id() else {
        tracing::warn!("Invalid user ID in token: {}", claims.sub);
        return Identity::anonymous();
    };

    if let Some(pool) = &app_state.db_pool {
        match user_exists(pool, user_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("Token refers to a deleted user: {}", user_id);
                return Identity::anonymous();
            }
            Err(e) => {
                tracing::warn!("Failed to verify token user {}: {:?}", user_id, e);
                return Identity::anonymous();
            }
        }
    }

    Identity(Some(AuthenticatedUser {
        user_id,
        username: claims.username,
    }))
}

async fn user_exists(pool: &PgPool, user_id: UserId) -> Result<bool, sqlx::Error> {
    use crate::backend::auth::users::get_user_by_id;

    Ok(get_user_by_id(pool, user_id).await?.is_some())
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Identity>().cloned().unwrap_or_default())
    }
}

/// Axum extractor for an authenticated caller
///
/// Rejects with 401 Unauthorized when the identity middleware resolved
/// nobody.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .and_then(|identity| identity.0.clone())
            .map(AuthUser)
            .ok_or(BackendError::Unauthorized)
    }
}
