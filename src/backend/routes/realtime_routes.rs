/**
 * Real-time Route Configuration
 *
 * - `GET /ws/notifications/` - WebSocket notification gateway
 */

use axum::{routing::get, Router};

use crate::backend::realtime::handle_notification_subscription;
use crate::backend::server::state::AppState;

/// Configure real-time routes
pub fn configure_realtime_routes(router: Router<AppState>) -> Router<AppState> {
    router.route(
        "/ws/notifications/",
        get(handle_notification_subscription),
    )
}
