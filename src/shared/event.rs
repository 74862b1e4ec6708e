/**
 * Notification Wire Types
 *
 * This module defines everything that crosses a notification connection:
 *
 * - `ClientMessage` - inbound `{"message": "<string>"}` frames
 * - `ServerMessage` - outbound echo and notification frames
 * - `NotificationEvent` - an event addressed to one user, produced by the
 *   CRUD layer and consumed by the gateway
 *
 * The group a user's connections join is derived with `group_key`, which
 * must stay `"user_" + id` for compatibility with existing clients.
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primary key of a user row
pub type UserId = i64;

/// Name of the broadcast group holding every connection of `user_id`
pub fn group_key(user_id: UserId) -> String {
    format!("user_{}", user_id)
}

/// Inbound frame sent by a client on an open connection
///
/// Parsing never fails: anything that is not an object with a string under
/// `message` yields an empty message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    #[serde(default)]
    pub message: String,
}

impl ClientMessage {
    /// Parse a text frame, defaulting every missing or mistyped field
    pub fn parse(text: &str) -> Self {
        let message = serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|value| match value.get("message") {
                Some(Value::String(message)) => Some(message.clone()),
                _ => None,
            })
            .unwrap_or_default();

        Self { message }
    }
}

/// Outbound frame written to a connection
///
/// Serialized untagged so the wire shapes are exactly
/// `{"message": ..}` and `{"notification": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerMessage {
    /// Echo of an inbound message, sent only to the originating connection
    Echo { message: String },
    /// Notification pushed to every connection of the target user
    Notification { notification: Value },
}

impl ServerMessage {
    pub fn echo(message: impl Into<String>) -> Self {
        Self::Echo {
            message: message.into(),
        }
    }

    pub fn notification(payload: Value) -> Self {
        Self::Notification {
            notification: payload,
        }
    }
}

impl From<ClientMessage> for ServerMessage {
    fn from(inbound: ClientMessage) -> Self {
        Self::echo(inbound.message)
    }
}

/// A notification addressed to one user
///
/// Serializes as `{"type": "notification", "payload": ..}`. The target is
/// carried alongside rather than on the wire since it only selects the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "notification")]
pub struct NotificationEvent {
    #[serde(skip)]
    pub target: UserId,
    pub payload: Value,
}

impl NotificationEvent {
    /// Create a notification with an arbitrary payload
    pub fn new(target: UserId, payload: Value) -> Self {
        Self { target, payload }
    }

    /// `liker` liked `post_id`, owned by `target`
    pub fn like(target: UserId, liker: &str, post_id: i64) -> Self {
        Self::new(
            target,
            serde_json::json!({
                "type": "like",
                "user": liker,
                "post": post_id,
                "message": format!("{} liked your post", liker),
            }),
        )
    }

    /// `author` commented on `post_id`, owned by `target`
    pub fn comment(target: UserId, author: &str, post_id: i64, comment_id: i64) -> Self {
        Self::new(
            target,
            serde_json::json!({
                "type": "comment",
                "user": author,
                "post": post_id,
                "comment": comment_id,
                "message": format!("{} commented on your post", author),
            }),
        )
    }

    /// Group the event is routed to
    pub fn group(&self) -> String {
        group_key(self.target)
    }

    /// Frame delivered to each subscribed connection
    pub fn into_message(self) -> ServerMessage {
        ServerMessage::notification(self.payload)
    }
}
