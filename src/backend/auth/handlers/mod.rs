//! Authentication Handlers Module
//!
//! HTTP handlers for token issuance and user accounts.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── types.rs    - Request and response types
//! ├── token.rs    - POST /api/token/
//! └── users.rs    - /api/v1/users/ CRUD
//! ```

/// Request and response types
pub mod types;

/// Token handler
pub mod token;

/// User account handlers
pub mod users;

// Re-export commonly used types
pub use types::{CreateUserRequest, TokenRequest, TokenResponse, UpdateUserRequest, UserResponse};

// Re-export handlers
pub use token::obtain_token;
pub use users::{create_user, delete_user, get_user, list_users, update_user};
