//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Configuration loading and validation
//! - **`init`** - State construction and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - ServerConfig, ConfigError, database loading
//! └── init.rs         - build_state and create_app
//! ```
//!
//! # State Management
//!
//! `AppState` holds the optional database pool, the process-wide
//! `NotificationRegistry` and the JWT settings. It is cloned into every
//! handler; clones share the registry.
//!
//! # Example
//!
//! ```rust,no_run
//! use social_media_api::backend::server::{build_state, create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let state = build_state(&config).await;
//! let app = create_app(state.clone());
//!
//! let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use init::{build_state, create_app};
pub use state::AppState;
