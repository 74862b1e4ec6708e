/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * Applied to every route, outermost first:
 * 1. `TraceLayer` - request spans
 * 2. `resolve_identity` - attaches the caller's `Identity`
 */

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::middleware::resolve_identity;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::realtime_routes::configure_realtime_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// 1. **Real-time Routes**: WebSocket notification gateway
/// 2. **API Routes**: Token, users, posts, comments, likes
/// 3. **Fallback Handler**: JSON 404 for unknown routes
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_realtime_routes(router);
    let router = configure_api_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async { BackendError::not_found("route") });

    router
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            resolve_identity,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
