/**
 * Comment Handlers
 *
 * # Routes
 *
 * - `GET /api/v1/comments/` - All comments, newest first
 * - `POST /api/v1/comments/` - Comment on a post (notifies the post owner)
 * - `GET /api/v1/comments/{id}/` - One comment
 * - `PUT|PATCH /api/v1/comments/{id}/` - Edit one of the caller's comments
 * - `DELETE /api/v1/comments/{id}/` - Delete one of the caller's comments
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::social::db::{self, is_foreign_key_violation};
use crate::backend::social::{notify_post_owner, unknown_post};
use crate::backend::social::types::{Comment, CommentId, CommentPatch, CreateCommentRequest};
use crate::shared::{NotificationEvent, SharedError};

pub async fn list_comments(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
) -> Result<Json<Vec<Comment>>, BackendError> {
    let pool = state.pool()?;

    Ok(Json(db::list_comments(pool).await?))
}

pub async fn get_comment(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(comment_id): Path<CommentId>,
) -> Result<Json<Comment>, BackendError> {
    let pool = state.pool()?;

    let comment = db::get_comment(pool, comment_id)
        .await?
        .ok_or_else(|| BackendError::not_found("comment"))?;

    Ok(Json(comment))
}

/// Comment on a post (POST /api/v1/comments/)
///
/// # Errors
///
/// * `400 Bad Request` - Blank content or unknown post
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), BackendError> {
    let pool = state.pool()?;
    SharedError::require_non_blank("content", &request.content)?;

    let owner = db::post_owner(pool, request.post)
        .await?
        .ok_or_else(|| unknown_post(request.post))?;

    let comment = db::create_comment(pool, caller.user_id, request.post, &request.content)
        .await
        .map_err(|e| {
            // The post was deleted between the lookup and the insert
            if is_foreign_key_violation(&e) {
                unknown_post(request.post)
            } else {
                e.into()
            }
        })?;

    tracing::info!(
        comment_id = comment.id,
        post_id = comment.post_id,
        user_id = caller.user_id,
        "Comment created"
    );

    notify_post_owner(
        &state.notifications,
        &caller,
        NotificationEvent::comment(owner, &caller.username, comment.post_id, comment.id),
    );

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Replace a comment's content (PUT /api/v1/comments/{id}/)
pub async fn replace_comment(
    state: State<AppState>,
    caller: AuthUser,
    path: Path<CommentId>,
    Json(patch): Json<CommentPatch>,
) -> Result<Json<Comment>, BackendError> {
    if patch.content.is_none() {
        return Err(BackendError::validation("content", "This field is required."));
    }
    update_comment(state, caller, path, Json(patch)).await
}

/// Partially update a comment (PATCH /api/v1/comments/{id}/)
pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(comment_id): Path<CommentId>,
    Json(patch): Json<CommentPatch>,
) -> Result<Json<Comment>, BackendError> {
    let pool = state.pool()?;
    if let Some(content) = &patch.content {
        SharedError::require_non_blank("content", content)?;
    }

    let comment = db::update_comment(pool, comment_id, caller.user_id, patch.content.as_deref())
        .await?
        .ok_or_else(|| BackendError::not_found("comment"))?;

    Ok(Json(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(comment_id): Path<CommentId>,
) -> Result<StatusCode, BackendError> {
    let pool = state.pool()?;

    if !db::delete_comment(pool, comment_id, caller.user_id).await? {
        return Err(BackendError::not_found("comment"));
    }

    Ok(StatusCode::NO_CONTENT)
}
