//! Shared Module
//!
//! This module contains types that describe what travels over the wire:
//! the frames exchanged on a notification connection and the notification
//! events produced by the CRUD layer. None of it depends on the server stack,
//! so clients and tests can use it without the `ssr` feature.

/// Gateway frames and notification events
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use event::{group_key, ClientMessage, NotificationEvent, ServerMessage, UserId};
pub use error::SharedError;
