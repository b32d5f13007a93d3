//! HTTP API for EDGAR N-PORT search and holdings extraction.

pub mod config;
pub mod handlers;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use state::AppState;

/// Build the application router. Unknown paths fall through to static files.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let api_routes = Router::new()
        .route("/api/config", get(handlers::get_config))
        .route("/api/search-nport", get(handlers::search_nport))
        .route("/api/parse-nport", get(handlers::parse_nport));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
