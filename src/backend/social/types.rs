/**
 * Social Types
 *
 * Rows and request bodies for posts, comments and likes. Rows are read
 * joined with the author's username and serialize directly into the API
 * representation (`user` is the username, `post` the post id).
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::UserId;

pub type PostId = i64;
pub type CommentId = i64;
pub type LikeId = i64;

/// Post with its author's username
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct Post {
    pub id: PostId,
    #[serde(skip)]
    pub user_id: UserId,
    #[serde(rename = "user")]
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment with its author's username
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    #[serde(skip)]
    pub user_id: UserId,
    #[serde(rename = "user")]
    pub username: String,
    #[serde(rename = "post")]
    pub post_id: PostId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like with its author's username
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
pub struct Like {
    pub id: LikeId,
    #[serde(skip)]
    pub user_id: UserId,
    #[serde(rename = "user")]
    pub username: String,
    #[serde(rename = "post")]
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create or replace a post (POST, PUT)
#[derive(Debug, Deserialize, Serialize)]
pub struct PostRequest {
    pub content: String,
}

/// Partial post update (PATCH)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostPatch {
    pub content: Option<String>,
}

/// Create a comment
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCommentRequest {
    pub post: PostId,
    pub content: String,
}

/// Update a comment (PATCH, PUT); the post cannot change
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CommentPatch {
    pub content: Option<String>,
}

/// Like a post
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateLikeRequest {
    pub post: PostId,
}
