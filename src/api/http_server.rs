use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::predict::predict_handler;
use crate::pricing::{FeatureAssembler, PriceRegressor};
use crate::vision::DamageClassifier;

/// Four photos per request can exceed axum's 2MB default body cap
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Immutable per-process context shared by every request handler.
///
/// All four artifacts are loaded once at startup and only read afterwards;
/// there is no global mutable state.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<DamageClassifier>,
    pub assembler: Arc<FeatureAssembler>,
    pub regressor: Arc<PriceRegressor>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Prediction endpoint
        .route("/predict", post(predict_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", port).parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": crate::version::VERSION_NUMBER,
    }))
}
