/**
 * Social Media Server Entry Point
 *
 * Loads configuration, builds the application state and serves the Axum
 * app until Ctrl-C or SIGTERM. On shutdown every notification connection
 * is told to close.
 */

#[cfg(feature = "ssr")]
use social_media_api::backend::{build_state, create_app, NotificationRegistry, ServerConfig};

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("[STARTUP] Server initialization started");

    let config = ServerConfig::from_env()?;
    tracing::debug!(?config, "[STARTUP] Configuration loaded");

    let state = build_state(&config).await;
    let registry = state.notifications.clone();
    let app = create_app(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[STARTUP] Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(registry))
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM, after closing every gateway connection
#[cfg(feature = "ssr")]
async fn shutdown_signal(registry: NotificationRegistry) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    let closed = registry.close_all();
    tracing::info!(closed, "Shutdown requested; closing notification connections");
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin social-media-server --features ssr");
    std::process::exit(1);
}
