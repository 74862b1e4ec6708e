/**
 * Social Database Operations
 *
 * Queries for posts, comments and likes. Every read joins `users` so rows
 * carry the author's username.
 *
 * Mutations take the caller's user id and only touch rows the caller owns;
 * a row owned by somebody else behaves exactly like a missing row.
 */

use sqlx::PgPool;

use crate::backend::social::types::{Comment, CommentId, Like, LikeId, Post, PostId};
use crate::shared::UserId;

// ========== Posts ==========

/// List all posts, newest first
pub async fn list_posts(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.user_id, u.username, p.content, p.created_at, p.updated_at
        FROM posts p
        JOIN users u ON u.id = p.user_id
        ORDER BY p.created_at DESC, p.id DESC
        "#
    )
    .fetch_all(pool)
    .await
}

/// Get a post by ID
pub async fn get_post(pool: &PgPool, id: PostId) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.user_id, u.username, p.content, p.created_at, p.updated_at
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE p.id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Owner of a post, if the post exists
pub async fn post_owner(pool: &PgPool, id: PostId) -> Result<Option<UserId>, sqlx::Error> {
    sqlx::query_scalar::<_, UserId>("SELECT user_id FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Create a post owned by `user_id`
pub async fn create_post(
    pool: &PgPool,
    user_id: UserId,
    content: &str,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        WITH inserted AS (
            INSERT INTO posts (user_id, content)
            VALUES ($1, $2)
            RETURNING id, user_id, content, created_at, updated_at
        )
        SELECT i.id, i.user_id, u.username, i.content, i.created_at, i.updated_at
        FROM inserted i
        JOIN users u ON u.id = i.user_id
        "#
    )
    .bind(user_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// Update one of the caller's posts
///
/// # Returns
/// Updated post or None if it does not exist or belongs to somebody else
pub async fn update_post(
    pool: &PgPool,
    id: PostId,
    owner: UserId,
    content: Option<&str>,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        WITH updated AS (
            UPDATE posts
            SET content = COALESCE($3, content),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, content, created_at, updated_at
        )
        SELECT d.id, d.user_id, u.username, d.content, d.created_at, d.updated_at
        FROM updated d
        JOIN users u ON u.id = d.user_id
        "#
    )
    .bind(id)
    .bind(owner)
    .bind(content)
    .fetch_optional(pool)
    .await
}

/// Delete one of the caller's posts (comments and likes cascade)
pub async fn delete_post(pool: &PgPool, id: PostId, owner: UserId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ========== Comments ==========

/// List all comments, newest first
pub async fn list_comments(pool: &PgPool) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.user_id, u.username, c.post_id, c.content, c.created_at, c.updated_at
        FROM comments c
        JOIN users u ON u.id = c.user_id
        ORDER BY c.created_at DESC, c.id DESC
        "#
    )
    .fetch_all(pool)
    .await
}

/// Get a comment by ID
pub async fn get_comment(pool: &PgPool, id: CommentId) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.user_id, u.username, c.post_id, c.content, c.created_at, c.updated_at
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Create a comment on `post_id`
pub async fn create_comment(
    pool: &PgPool,
    user_id: UserId,
    post_id: PostId,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        WITH inserted AS (
            INSERT INTO comments (user_id, post_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, post_id, content, created_at, updated_at
        )
        SELECT i.id, i.user_id, u.username, i.post_id, i.content, i.created_at, i.updated_at
        FROM inserted i
        JOIN users u ON u.id = i.user_id
        "#
    )
    .bind(user_id)
    .bind(post_id)
    .bind(content)
    .fetch_one(pool)
    .await
}

/// Update one of the caller's comments
pub async fn update_comment(
    pool: &PgPool,
    id: CommentId,
    owner: UserId,
    content: Option<&str>,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        WITH updated AS (
            UPDATE comments
            SET content = COALESCE($3, content),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, post_id, content, created_at, updated_at
        )
        SELECT d.id, d.user_id, u.username, d.post_id, d.content, d.created_at, d.updated_at
        FROM updated d
        JOIN users u ON u.id = d.user_id
        "#
    )
    .bind(id)
    .bind(owner)
    .bind(content)
    .fetch_optional(pool)
    .await
}

/// Delete one of the caller's comments
pub async fn delete_comment(
    pool: &PgPool,
    id: CommentId,
    owner: UserId,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ========== Likes ==========

/// List all likes, oldest first
pub async fn list_likes(pool: &PgPool) -> Result<Vec<Like>, sqlx::Error> {
    sqlx::query_as::<_, Like>(
        r#"
        SELECT l.id, l.user_id, u.username, l.post_id, l.created_at, l.updated_at
        FROM likes l
        JOIN users u ON u.id = l.user_id
        ORDER BY l.id
        "#
    )
    .fetch_all(pool)
    .await
}

/// Get a like by ID
pub async fn get_like(pool: &PgPool, id: LikeId) -> Result<Option<Like>, sqlx::Error> {
    sqlx::query_as::<_, Like>(
        r#"
        SELECT l.id, l.user_id, u.username, l.post_id, l.created_at, l.updated_at
        FROM likes l
        JOIN users u ON u.id = l.user_id
        WHERE l.id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Like `post_id`
///
/// # Returns
/// Created like, or a unique-violation error when the caller already
/// likes the post
pub async fn create_like(
    pool: &PgPool,
    user_id: UserId,
    post_id: PostId,
) -> Result<Like, sqlx::Error> {
    sqlx::query_as::<_, Like>(
        r#"
        WITH inserted AS (
            INSERT INTO likes (user_id, post_id)
            VALUES ($1, $2)
            RETURNING id, user_id, post_id, created_at, updated_at
        )
        SELECT i.id, i.user_id, u.username, i.post_id, i.created_at, i.updated_at
        FROM inserted i
        JOIN users u ON u.id = i.user_id
        "#
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await
}

/// Remove one of the caller's likes
pub async fn delete_like(pool: &PgPool, id: LikeId, owner: UserId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Whether a database error is a foreign-key violation
pub fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
