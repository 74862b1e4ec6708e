//! Integration tests
//!
//! - `api` - HTTP endpoints through `axum-test`
//! - `realtime` - the notification gateway over real WebSockets

#[cfg(feature = "ssr")]
pub mod api;
#[cfg(feature = "ssr")]
pub mod realtime;
