//! Real server fixture
//!
//! Serves the full application on `127.0.0.1:0` so WebSocket clients can
//! connect to it.

use std::net::SocketAddr;
use std::time::Duration;

use sqlx::PgPool;

use social_media_api::backend::server::{create_app, AppState};

use super::auth_helpers::test_jwt_settings;

/// A running server and the state it serves
pub struct TestApp {
    pub addr: SocketAddr,
    pub state: AppState,
}

impl TestApp {
    /// Spawn a server without a database
    pub async fn spawn() -> Self {
        Self::spawn_with(None).await
    }

    /// Spawn a server backed by `pool`
    pub async fn spawn_with(pool: Option<PgPool>) -> Self {
        let state = AppState::new(pool, test_jwt_settings());
        let app = create_app(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self { addr, state }
    }

    /// Notification gateway URL, optionally carrying a token
    pub fn ws_url(&self, token: Option<&str>) -> String {
        match token {
            Some(token) => format!("ws://{}/ws/notifications/?token={}", self.addr, token),
            None => format!("ws://{}/ws/notifications/", self.addr),
        }
    }

    /// Wait until `user_id` has exactly `expected` registered connections
    pub async fn wait_for_group_size(&self, user_id: i64, expected: usize) {
        let registry = &self.state.notifications;
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);

        while registry.group_size(user_id) != expected {
            if tokio::time::Instant::now() > deadline {
                panic!(
                    "group of user {} has {} connections, expected {}",
                    user_id,
                    registry.group_size(user_id),
                    expected
                );
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}
