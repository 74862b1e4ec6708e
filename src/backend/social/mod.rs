//! Social Module
//!
//! Posts, comments and likes: the CRUD side of the application. Likes and
//! comments on somebody else's post produce a notification addressed to
//! the post owner through the `NotificationRegistry`.
//!
//! # Module Structure
//!
//! ```text
//! social/
//! ├── mod.rs        - Module exports and the notification hook
//! ├── types.rs      - Rows and request bodies
//! ├── db.rs         - Database operations
//! ├── posts.rs      - /api/v1/posts/ handlers
//! ├── comments.rs   - /api/v1/comments/ handlers
//! └── likes.rs      - /api/v1/likes/ handlers
//! ```

pub mod types;
pub mod db;
pub mod posts;
pub mod comments;
pub mod likes;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthenticatedUser;
use crate::backend::realtime::NotificationRegistry;
use crate::backend::social::types::PostId;
use crate::shared::NotificationEvent;

pub use types::{Comment, Like, Post};

/// Hand `event` to the registry unless the actor is the event's target
///
/// Returns whether the event was dispatched. Delivery itself is
/// fire-and-forget; nobody being connected is not an error.
pub fn notify_post_owner(
    registry: &NotificationRegistry,
    actor: &AuthenticatedUser,
    event: NotificationEvent,
) -> bool {
    if event.target == actor.user_id {
        tracing::debug!(user_id = actor.user_id, "Skipping notification about own post");
        return false;
    }

    registry.dispatch(event);
    true
}

pub(crate) fn unknown_post(post_id: PostId) -> BackendError {
    BackendError::validation("post", format!("Invalid pk \"{}\" - object does not exist.", post_id))
}
