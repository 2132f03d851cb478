//! Axum API server for the retrieval service.

use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::store::ArtifactStore;

/// Shared state for all API handlers.
///
/// The store instance is injected here so the slot location is configuration
/// rather than an ambient path constant.
#[derive(Clone)]
pub struct AppState {
    /// The single-slot artifact store the retrieval endpoint reads from.
    pub store: Arc<ArtifactStore>,
}

impl AppState {
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    // The API is read-only, so GET from any origin is safe to allow.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]);

    Router::new()
        .route(
            "/api/get-generated-component",
            get(super::routes::component::get_generated_component),
        )
        .route("/api/health", get(super::routes::health::get_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the API server.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = build_router(state);
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Retrieval API server listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
