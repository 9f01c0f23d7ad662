use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use postertrack_api::config::{ConfigError, ServerConfig};
use postertrack_api::router::build_app_router;
use postertrack_api::state::AppState;
use postertrack_api::storage::LocalEvidenceStore;
use postertrack_events::{EmailConfig, EmailDelivery, EmailError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reasons the server fails to start or stops abnormally.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid HOST address '{0}'")]
    Host(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("email setup error: {0}")]
    Email(#[from] EmailError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postertrack_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
    let pool = postertrack_db::create_pool(&database_url).await?;
    postertrack_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");
    postertrack_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let email = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(smtp_host = %email_config.smtp_host, "Email delivery enabled");
            Some(Arc::new(EmailDelivery::new(&email_config)?))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, email delivery disabled");
            None
        }
    };

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let evidence = Arc::new(LocalEvidenceStore::new(
        config.upload_dir.clone(),
        config.public_base_url.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        email,
        evidence,
    };
    let app = build_app_router(state, &config);

    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|_| StartupError::Host(config.host.clone()))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Resolve on SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
