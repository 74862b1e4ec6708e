//! Backend Module
//!
//! This module contains all server-side code for the social media API:
//! an Axum HTTP server with JWT-authenticated CRUD endpoints and a
//! WebSocket notification gateway.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - JWT tokens, password hashing, user accounts
//! - **`middleware`** - Identity resolution and extractors
//! - **`social`** - Posts, comments and likes
//! - **`realtime`** - Notification registry and WebSocket gateway
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and users
//! ├── middleware/     - Request middleware
//! ├── social/         - Posts, comments, likes
//! ├── realtime/       - Notification gateway
//! └── error/          - Error types
//! ```
//!
//! # Notification Flow
//!
//! ```text
//! POST /api/v1/likes/ ──> create_like ──> NotificationRegistry::dispatch
//!                                               │
//!                                  group "user_{owner}" lookup
//!                                               │
//!                     ┌─────────────────────────┼────────────────────────┐
//!                     ▼                         ▼                        ▼
//!              connection task          connection task           (no sessions:
//!            {"notification": ..}     {"notification": ..}          dropped)
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; the error converts into a
//! JSON response `{"error": .., "status": ..}`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Real-time notification gateway
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Posts, comments and likes
pub mod social;

/// Re-export commonly used types
pub use error::BackendError;
pub use realtime::NotificationRegistry;
pub use server::{build_state, create_app, AppState, ServerConfig};
