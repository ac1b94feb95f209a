use std::net::{IpAddr, SocketAddr};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pdm_api::config::{ConfigError, ServerConfig};
use pdm_api::router::build_app_router;
use pdm_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "pdm_api=debug,pdm_core=debug,pdm_db=debug,tower_http=debug";

/// Anything that stops the server from coming up or shutting down cleanly.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("invalid HOST address '{0}'")]
    InvalidHost(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

/// Human-readable logs by default, JSON lines when `LOG_FORMAT=json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        risk_threshold = config.risk_threshold,
        high_risk_probability = config.high_risk_probability,
        "Loaded server configuration",
    );

    let host: IpAddr = config
        .host
        .parse()
        .map_err(|_| StartupError::InvalidHost(config.host.clone()))?;
    let addr = SocketAddr::new(host, config.port);

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| StartupError::MissingDatabaseUrl)?;
    let pool = pdm_db::create_pool(&database_url, config.db_max_connections).await?;
    pdm_db::health_check(&pool).await?;
    pdm_db::run_migrations(&pool).await?;
    tracing::info!(max_connections = config.db_max_connections, "Database ready");

    let state = AppState::new(pool.clone(), config);
    tracing::info!(
        strategy = state.predictor.strategy().name(),
        "Maintenance predictor ready",
    );
    let app = build_app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Close the pool even when serving failed.
    pool.close().await;
    tracing::info!("Database pool closed");

    served.map_err(StartupError::from)
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
