/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the optional database (and run migrations)
 * 2. Create the notification registry and JWT settings
 * 3. Create and configure the router
 *
 * `build_state` and `create_app` are split so callers (the binary, tests)
 * keep a handle on the registry: `notify` for collaborators, `close_all` at
 * shutdown.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Build the application state from configuration
///
/// # Error Handling
///
/// - Missing database: state is built without a pool (CRUD answers 503)
/// - Migration failures: logged but don't prevent startup
pub async fn build_state(config: &ServerConfig) -> AppState {
    tracing::info!("Initializing social media backend");

    let db_pool = load_database(config.database_url.as_deref()).await;
    let state = AppState::new(db_pool, config.jwt_settings());

    tracing::info!(
        database = state.db_pool.is_some(),
        token_ttl_secs = state.jwt.ttl_secs(),
        "Application state initialized"
    );

    state
}

/// Create the Axum application for an existing state
pub fn create_app(state: AppState) -> Router<()> {
    let app = create_router(state);
    tracing::info!("Router configured");
    app
}
