use std::sync::Arc;

use abendlog_core::controller::ViewController;
use abendlog_core::source::LogSource;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The single interactive session. Handlers lock it for the duration of
    /// one user action, so actions apply one at a time.
    pub session: Arc<Mutex<ViewController>>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Remote log-load endpoint, if one is configured.
    pub log_source: Option<Arc<dyn LogSource>>,
}

impl AppState {
    pub fn new(
        controller: ViewController,
        config: ServerConfig,
        log_source: Option<Arc<dyn LogSource>>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(controller)),
            config: Arc::new(config),
            log_source,
        }
    }
}
