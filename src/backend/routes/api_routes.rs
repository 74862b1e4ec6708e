/**
 * API Route Configuration
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/token/` - Exchange credentials for a JWT
 *
 * ## Users
 * - `GET|POST /api/v1/users/`
 * - `GET|PUT|PATCH|DELETE /api/v1/users/{id}/`
 *
 * ## Posts, comments, likes
 * - `GET|POST /api/v1/{posts,comments,likes}/`
 * - `GET|PUT|PATCH|DELETE /api/v1/{posts,comments}/{id}/`
 * - `GET|DELETE /api/v1/likes/{id}/`
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{create_user, delete_user, get_user, list_users, obtain_token, update_user};
use crate::backend::server::state::AppState;
use crate::backend::social::{comments, likes, posts};

/// Configure API routes
///
/// # Authentication
///
/// Everything except `POST /api/token/` and `POST /api/v1/users/` requires
/// a token; the check happens in handlers through the `AuthUser`
/// extractor.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/token/", post(obtain_token))
        // Users
        .route("/api/v1/users/", get(list_users).post(create_user))
        .route(
            "/api/v1/users/{id}/",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
        // Posts
        .route(
            "/api/v1/posts/",
            get(posts::list_posts).post(posts::create_post),
        )
        .route(
            "/api/v1/posts/{id}/",
            get(posts::get_post)
                .put(posts::replace_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        // Comments
        .route(
            "/api/v1/comments/",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/api/v1/comments/{id}/",
            get(comments::get_comment)
                .put(comments::replace_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        )
        // Likes
        .route(
            "/api/v1/likes/",
            get(likes::list_likes).post(likes::create_like),
        )
        .route(
            "/api/v1/likes/{id}/",
            get(likes::get_like).delete(likes::delete_like),
        )
}
