use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::model::{Predictor, StatusThresholds};
use crate::pipeline::baseline::Baseline;
use crate::pipeline::history::HistoryStore;
use crate::pipeline::predict::PredictContext;
use crate::report::CHART_IMAGES;

pub mod error;
pub mod handlers;

/// Process-wide state. Everything except `history` is read-only after startup.
pub struct AppState {
    pub baseline: Baseline,
    pub predictor: Box<dyn Predictor>,
    pub history: HistoryStore,
    pub thresholds: StatusThresholds,
    pub images: &'static [&'static str],
}

impl AppState {
    pub fn new(baseline: Baseline, predictor: Box<dyn Predictor>, history: HistoryStore) -> Self {
        Self {
            baseline,
            predictor,
            history,
            thresholds: StatusThresholds::default_v1(),
            images: &CHART_IMAGES,
        }
    }

    pub fn predict_context(&self) -> PredictContext<'_> {
        PredictContext {
            baseline: &self.baseline,
            predictor: self.predictor.as_ref(),
            history: &self.history,
            thresholds: self.thresholds,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub static_dir: PathBuf,
}

pub fn build_router(state: Arc<AppState>, static_dir: PathBuf) -> Router {
    Router::new()
        .route("/", get(handlers::form_page))
        .route(
            "/dashboard",
            get(handlers::dashboard).post(handlers::dashboard),
        )
        .route(
            "/predict",
            get(handlers::form_page).post(handlers::predict),
        )
        .route("/api/history", get(handlers::api_history))
        .route("/api/baseline", get(handlers::api_baseline))
        .route("/health", get(handlers::health))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, config: ServerConfig) -> std::io::Result<()> {
    if !config.static_dir.is_dir() {
        tracing::warn!(
            static_dir = %config.static_dir.display(),
            "static directory not found; dashboard charts will not load"
        );
    }
    let app = build_router(state, config.static_dir);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("astrohealth listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
#[path = "../../tests/src_inline/server/tests.rs"]
mod tests;
