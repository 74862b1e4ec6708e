//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs              - Module exports and documentation
//! ├── router.rs           - Main router creation and layers
//! ├── realtime_routes.rs  - WebSocket notification gateway
//! └── api_routes.rs       - Token and CRUD endpoints
//! ```
//!
//! # Route Types
//!
//! ## Real-time Routes
//!
//! - `GET /ws/notifications/` - Per-user notification WebSocket
//!
//! ## API Routes
//!
//! - `POST /api/token/` - Obtain a token
//! - `/api/v1/users/`, `/api/v1/posts/`, `/api/v1/comments/`,
//!   `/api/v1/likes/` - Collection and `{id}/` detail routes
//!
//! Unknown routes answer a JSON 404.

/// Main router creation
pub mod router;

/// Real-time route configuration
pub mod realtime_routes;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
