use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use queueboard_core::{
    load_config, validate_config, ActiveTicketRegistry, Config, LogFormat, QueueService,
    QueueStore, SqliteQueueStore,
};
use queueboard_server::api::{create_router, WsBroadcaster};
use queueboard_server::state::AppState;

#[tokio::main]
async fn main() {
    // Determine config path
    let config_path = std::env::var("QUEUEBOARD_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Logging format comes from the config, so load it first
    let config = match load_and_validate(&config_path) {
        Ok(config) => config,
        Err(e) => {
            init_logging(LogFormat::Pretty);
            error!("Fatal error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(config.logging.format);
    info!("Configuration loaded from {:?}", config_path);

    if let Err(e) = run(config).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_and_validate(path: &Path) -> Result<Config> {
    let config =
        load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?;
    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn run(config: Config) -> Result<()> {
    info!("Database path: {:?}", config.database.path);

    // Queue definitions are persisted; assignments are not
    let queue_store: Arc<dyn QueueStore> = Arc::new(
        SqliteQueueStore::new(&config.database.path).context("Failed to create queue store")?,
    );
    info!("Queue store initialized");

    let ws_broadcaster = WsBroadcaster::new(config.signage.channel_capacity);
    info!(
        "Signage broadcaster initialized (heartbeat every {}s)",
        config.signage.heartbeat_secs
    );

    let registry = Arc::new(ActiveTicketRegistry::with_observer(Arc::new(
        ws_broadcaster.clone(),
    )));
    info!("Active ticket registry initialized");

    let addr = SocketAddr::new(config.server.host, config.server.port);

    let state = Arc::new(AppState::new(
        config,
        registry,
        QueueService::new(queue_store),
        ws_broadcaster,
    ));

    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
