use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use abendlog_core::controller::ViewController;
use abendlog_core::seed::sample_entries;
use abendlog_core::source::LogSource;
use abendlog_core::store::LogStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use abendlog_api::config::ServerConfig;
use abendlog_api::remote::HttpLogSource;
use abendlog_api::router::build_app_router;
use abendlog_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abendlog_api=debug,abendlog_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Session ---
    let store = if config.seed_sample_entries {
        let entries = sample_entries();
        tracing::info!(count = entries.len(), "Seeding sample log entries");
        LogStore::with_entries(entries)
    } else {
        LogStore::new()
    };
    let controller = ViewController::new(store);

    // --- Log source ---
    let log_source: Option<Arc<dyn LogSource>> = match &config.log_source_url {
        Some(url) => {
            let source = HttpLogSource::new(
                url.clone(),
                Duration::from_secs(config.log_fetch_timeout_secs),
            )
            .expect("Failed to build log source HTTP client");
            tracing::info!(url = %url, "Log source configured");
            Some(Arc::new(source))
        }
        None => {
            tracing::info!("LOG_SOURCE_URL not set; remote loading disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState::new(controller, config.clone(), log_source);

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
