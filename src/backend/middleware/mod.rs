//! Middleware Module
//!
//! HTTP middleware for the backend server. Middleware runs before
//! handlers and prepares per-request context.
//!
//! # Architecture
//!
//! - **`auth`** - Identity resolution plus the `Identity` and `AuthUser`
//!   extractors
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use social_media_api::backend::middleware::resolve_identity;
//! use social_media_api::backend::server::state::AppState;
//!
//! fn wire(router: Router<AppState>, state: AppState) -> Router {
//!     router
//!         .layer(middleware::from_fn_with_state(state.clone(), resolve_identity))
//!         .with_state(state)
//! }
//! ```

pub mod auth;

pub use auth::{extract_token, resolve_identity, AuthUser, AuthenticatedUser, Identity};
