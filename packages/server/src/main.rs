use std::net::SocketAddr;

use nport_server::{router, AppConfig, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app_config = AppConfig::from_env();

    let app_state = match AppState::new(app_config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to create EDGAR client");
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], app_state.config.port));
    tracing::info!(
        user_agent = app_state.config.effective_user_agent(),
        "NPORT Analyzer running at http://localhost:{}",
        app_state.config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to bind on {addr}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, router(app_state)).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
