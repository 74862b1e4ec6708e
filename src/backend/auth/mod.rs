//! Authentication Module
//!
//! User accounts, password hashing and JWT sessions.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! ├── password.rs     - bcrypt hashing off the async workers
//! └── handlers/       - HTTP handlers (token, users)
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: `POST /api/v1/users/` → user created (password hashed)
//! 2. **Token**: `POST /api/token/` → credentials verified → JWT returned
//! 3. **Use**: `Authorization: Bearer <jwt>` on API calls, or `?token=<jwt>`
//!    on the notification WebSocket
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs with a configurable lifetime (30 days by default)
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Password hashing and verification
pub mod password;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use password::{hash_password, verify_password};
pub use sessions::{create_token, verify_token, Claims, JwtSettings};
pub use handlers::{create_user, delete_user, get_user, list_users, obtain_token, update_user};
