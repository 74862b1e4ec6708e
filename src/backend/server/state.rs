/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * `FromRef` for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The notification registry (process-wide, created at start-up)
 * - JWT signing settings
 * - An optional PostgreSQL pool
 *
 * # State Extraction
 *
 * The `FromRef` implementation lets Axum handlers extract specific
 * parts of the state without the entire `AppState`. The gateway
 * handler, for example, only asks for `State<NotificationRegistry>`.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use social_media_api::backend::server::state::AppState;
 *
 * async fn handler(State(state): State<AppState>) {
 *     state.notifications.notify(42, serde_json::json!({"type": "ping"}));
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::auth::sessions::JwtSettings;
use crate::backend::error::BackendError;
use crate::backend::realtime::NotificationRegistry;

/// Application state shared by every handler
///
/// # Fields
///
/// * `db_pool` - Optional PostgreSQL database connection pool
/// * `notifications` - Per-user notification groups
/// * `jwt` - Token signing secret and lifetime
#[derive(Clone, Debug)]
pub struct AppState {
    /// Optional PostgreSQL database connection pool
    ///
    /// `None` when `DATABASE_URL` is not set or the connection failed.
    /// CRUD endpoints answer 503 in that case; the gateway keeps working.
    pub db_pool: Option<PgPool>,

    /// Notification registry
    ///
    /// Cloning shares the same underlying tables.
    pub notifications: NotificationRegistry,

    pub jwt: Arc<JwtSettings>,
}

impl AppState {
    pub fn new(db_pool: Option<PgPool>, jwt: JwtSettings) -> Self {
        Self {
            db_pool,
            notifications: NotificationRegistry::new(),
            jwt: Arc::new(jwt),
        }
    }

    /// Borrow the database pool, or fail with 503
    pub fn pool(&self) -> Result<&PgPool, BackendError> {
        self.db_pool.as_ref().ok_or(BackendError::DatabaseUnavailable)
    }
}

impl FromRef<AppState> for NotificationRegistry {
    fn from_ref(app_state: &AppState) -> NotificationRegistry {
        app_state.notifications.clone()
    }
}
