use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use opd_booking::api;
use opd_booking::config::{self, AppConfig};
use opd_booking::db;
use opd_booking::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    std::fs::create_dir_all(&config.data_dir).expect("Cannot create data directory");

    // Open once up front so migrations run before the first request.
    db::open_database(&config.db_path()).expect("Ledger database initialization failed");
    tracing::info!(db = %config.db_path().display(), "ledger ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState::new(config));

    let mut server = api::start_server(state, addr)
        .await
        .expect("API server failed to start");
    tracing::info!(addr = %server.addr, "listening");

    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    tracing::info!("shutting down");
    server.shutdown();
}
