/**
 * Post Handlers
 *
 * # Routes
 *
 * - `GET /api/v1/posts/` - All posts, newest first
 * - `POST /api/v1/posts/` - Create a post owned by the caller
 * - `GET /api/v1/posts/{id}/` - One post
 * - `PUT|PATCH /api/v1/posts/{id}/` - Edit one of the caller's posts
 * - `DELETE /api/v1/posts/{id}/` - Delete one of the caller's posts
 *
 * Every route requires authentication. Mutations on somebody else's post
 * answer 404, as if the post did not exist.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::social::db;
use crate::backend::social::types::{Post, PostId, PostPatch, PostRequest};
use crate::shared::SharedError;

pub async fn list_posts(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
) -> Result<Json<Vec<Post>>, BackendError> {
    let pool = state.pool()?;

    Ok(Json(db::list_posts(pool).await?))
}

pub async fn get_post(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(post_id): Path<PostId>,
) -> Result<Json<Post>, BackendError> {
    let pool = state.pool()?;

    let post = db::get_post(pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("post"))?;

    Ok(Json(post))
}

/// Create a post (POST /api/v1/posts/)
///
/// # Errors
///
/// * `400 Bad Request` - Blank content
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(request): Json<PostRequest>,
) -> Result<(StatusCode, Json<Post>), BackendError> {
    let pool = state.pool()?;
    SharedError::require_non_blank("content", &request.content)?;

    let post = db::create_post(pool, caller.user_id, &request.content).await?;

    tracing::info!(post_id = post.id, user_id = caller.user_id, "Post created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// Replace a post's content (PUT /api/v1/posts/{id}/)
pub async fn replace_post(
    state: State<AppState>,
    caller: AuthUser,
    path: Path<PostId>,
    Json(request): Json<PostRequest>,
) -> Result<Json<Post>, BackendError> {
    let patch = PostPatch {
        content: Some(request.content),
    };
    update_post(state, caller, path, Json(patch)).await
}

/// Partially update a post (PATCH /api/v1/posts/{id}/)
///
/// # Errors
///
/// * `400 Bad Request` - Blank content
/// * `404 Not Found` - Unknown post, or a post owned by somebody else
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(post_id): Path<PostId>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<Post>, BackendError> {
    let pool = state.pool()?;
    if let Some(content) = &patch.content {
        SharedError::require_non_blank("content", content)?;
    }

    let post = db::update_post(pool, post_id, caller.user_id, patch.content.as_deref())
        .await?
        .ok_or_else(|| BackendError::not_found("post"))?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(post_id): Path<PostId>,
) -> Result<StatusCode, BackendError> {
    let pool = state.pool()?;

    if !db::delete_post(pool, post_id, caller.user_id).await? {
        return Err(BackendError::not_found("post"));
    }

    tracing::info!(post_id, user_id = caller.user_id, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}
