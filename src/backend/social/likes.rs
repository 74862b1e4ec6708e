/**
 * Like Handlers
 *
 * # Routes
 *
 * - `GET /api/v1/likes/` - All likes
 * - `POST /api/v1/likes/` - Like a post (notifies the post owner)
 * - `GET /api/v1/likes/{id}/` - One like
 * - `DELETE /api/v1/likes/{id}/` - Remove one of the caller's likes
 *
 * A user can like a post at most once; the second attempt answers 400.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::users::is_unique_violation;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::social::db::{self, is_foreign_key_violation};
use crate::backend::social::{notify_post_owner, unknown_post};
use crate::backend::social::types::{CreateLikeRequest, Like, LikeId};
use crate::shared::NotificationEvent;

pub async fn list_likes(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
) -> Result<Json<Vec<Like>>, BackendError> {
    let pool = state.pool()?;

    Ok(Json(db::list_likes(pool).await?))
}

pub async fn get_like(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(like_id): Path<LikeId>,
) -> Result<Json<Like>, BackendError> {
    let pool = state.pool()?;

    let like = db::get_like(pool, like_id)
        .await?
        .ok_or_else(|| BackendError::not_found("like"))?;

    Ok(Json(like))
}

/// Like a post (POST /api/v1/likes/)
///
/// On success the post owner is sent
/// `{"type": "like", "user": <liker>, "post": <id>, "message": "<liker> liked your post"}`
/// unless they liked their own post.
///
/// # Errors
///
/// * `400 Bad Request` - Unknown post, or the post is already liked
pub async fn create_like(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(request): Json<CreateLikeRequest>,
) -> Result<(StatusCode, Json<Like>), BackendError> {
    let pool = state.pool()?;

    let owner = db::post_owner(pool, request.post)
        .await?
        .ok_or_else(|| unknown_post(request.post))?;

    let like = db::create_like(pool, caller.user_id, request.post)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::validation("post", "You have already liked this post.")
            } else if is_foreign_key_violation(&e) {
                unknown_post(request.post)
            } else {
                e.into()
            }
        })?;

    tracing::info!(
        like_id = like.id,
        post_id = like.post_id,
        user_id = caller.user_id,
        "Post liked"
    );

    notify_post_owner(
        &state.notifications,
        &caller,
        NotificationEvent::like(owner, &caller.username, like.post_id),
    );

    Ok((StatusCode::CREATED, Json(like)))
}

/// Remove a like (DELETE /api/v1/likes/{id}/)
///
/// # Errors
///
/// * `404 Not Found` - Unknown like, or a like owned by somebody else
pub async fn delete_like(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(like_id): Path<LikeId>,
) -> Result<StatusCode, BackendError> {
    let pool = state.pool()?;

    if !db::delete_like(pool, like_id, caller.user_id).await? {
        return Err(BackendError::not_found("like"));
    }

    Ok(StatusCode::NO_CONTENT)
}
