//! HTTP API
//!
//! One route, `GET /search`, behind a header-presence authorization gate.
//! Every error response has the shape `{"error": "..."}`.

mod auth;
mod error;
mod handlers;
mod response;

pub use auth::require_authorization;
pub use error::{handle_panic, ApiError, ErrorBody};
pub use handlers::{handle_not_found, handle_search, SearchParams};
pub use response::{ResponseRecord, SearchResponse, SeriesEntry};

use crate::catalog::Provider;
use crate::config::ServerConfig;
use crate::ProviderError;
use axum::routing::get;
use axum::{middleware, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the API router around a shared provider
///
/// Layers are applied innermost first, so CORS is outermost and answers
/// preflight requests before the authorization gate runs.
pub fn build_router(provider: Arc<Provider>) -> Router {
    Router::new()
        .route("/search", get(handle_search))
        .fallback(handle_not_found)
        .layer(middleware::from_fn(require_authorization))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(provider)
}

/// Binds the listener and serves the API until the process exits
pub async fn serve(config: &ServerConfig, provider: Arc<Provider>) -> Result<(), ProviderError> {
    let app = build_router(provider);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        "Audioteka provider listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}
