//! Social Media API - Main Library
//!
//! A social-media backend exposing CRUD over users, posts, comments and likes,
//! plus a real-time notification gateway that pushes events ("someone liked
//! your post") to every open WebSocket session of the affected user.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types and errors that do not depend on the server stack
//!   - Gateway frames (`{"message": ..}`, `{"notification": ..}`)
//!   - Notification events and group key derivation
//!   - Shared error types
//!
//! - **`backend`** - Server-side code (only compiled with the `ssr` feature)
//!   - Axum HTTP server, configuration and application state
//!   - JWT authentication and identity resolution middleware
//!   - Users / posts / comments / likes endpoints backed by PostgreSQL
//!   - Notification gateway: connection registry and WebSocket handler
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary.
//!
//! # Usage
//!
//! ```rust,no_run
//! use social_media_api::backend::server::{build_state, create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let state = build_state(&config).await;
//!
//! // Any part of the server can push to a user's open sessions
//! state.notifications.notify(42, serde_json::json!({"type": "like"}));
//!
//! let app = create_app(state);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The connection registry is a pair of sharded concurrent maps. Connects,
//! disconnects and notifications for different users never contend; for the
//! same user they are serialized by the shard lock of that user's group.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
