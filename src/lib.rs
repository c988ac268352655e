pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::{add_log, start_server};

/// Load settings, wire the service and serve until shutdown.
pub async fn run() -> Result<()> {
    let config = ConfigService::new();

    // RUST_LOG wins over the configured level
    let default_level = config
        .figment()
        .extract_inner::<String>("server.log_level")
        .unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let settings = config.load()?;
    info!(
        config = %config.config_path().display(),
        classifier = %settings.classifier.kind,
        report = %settings.storage.report_file.display(),
        "Settings loaded"
    );

    let state = bootstrap::setup(&settings)?;
    let server = start_server(state.clone(), &settings.server)?;

    add_log(
        &state.logs,
        "INFO",
        "System",
        &format!(
            "HTTP server listening on http://{}:{}",
            settings.server.host, settings.server.port
        ),
    );

    server
        .await
        .map_err(|e| AppError::IoError(format!("HTTP server stopped: {}", e)))
}
