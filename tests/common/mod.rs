//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Database test fixtures
//! - A real server bound to an ephemeral port
//! - Authentication test helpers
//! - Custom assertion macros

pub mod assertions;
#[cfg(feature = "ssr")]
pub mod auth_helpers;
#[cfg(feature = "ssr")]
pub mod database;
#[cfg(feature = "ssr")]
pub mod server;

// Re-export commonly used utilities
#[cfg(feature = "ssr")]
pub use auth_helpers::*;
#[cfg(feature = "ssr")]
pub use database::*;
#[cfg(feature = "ssr")]
pub use server::*;
