//! Backend Error Module
//!
//! Error types returned by HTTP handlers and by the notification gateway's
//! lifecycle operations.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`; every error becomes a JSON body
//! `{"error": .., "status": ..}` with the matching status code. Internal
//! failures are logged with their details and reported generically.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
