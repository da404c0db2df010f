//! Route Configuration
//!
//! Health and metrics routes served next to the bot.

use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Router};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use super::health;
use crate::infrastructure::metrics;
use crate::presentation::discord::GatewayState;

/// State shared by the ops handlers
#[derive(Clone)]
pub struct OpsState {
    /// Pool to ping, absent for the memory backend
    pub pool: Option<PgPool>,
    pub gateway: Arc<GatewayState>,
}

/// Create the ops router
pub fn create_router(state: OpsState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}
