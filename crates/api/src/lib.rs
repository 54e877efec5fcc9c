//! Channel Earnings API Server
//!
//! REST surface for the earnings estimation pipeline: estimate endpoint,
//! canonical country vocabulary, and process health.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod routes;

pub use crate::config::Settings;

use artifact_store::ArtifactStore;
use feature_builder::FeatureBuilder;
use input_validator::Validator;
use predictor::Predictor;

/// Application state shared across handlers. Everything inside is
/// immutable after startup, so handlers share it without locking.
pub struct AppState {
    /// Loaded training artifacts
    pub store: Arc<ArtifactStore>,
    /// Feature preparation stage
    pub builder: FeatureBuilder,
    /// Prediction stage
    pub predictor: Predictor,
    /// Caller-side bounds policy
    pub validator: Validator,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wire the pipeline stages around a loaded artifact store
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self {
            builder: FeatureBuilder::new(Arc::clone(&store)),
            predictor: Predictor::new(Arc::clone(&store)),
            validator: Validator::default(),
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub countries: usize,
    pub model: &'static str,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/estimate", post(routes::estimate::post_estimate))
        .route("/api/v1/countries", get(routes::countries::get_countries))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        countries: state.store.countries().len(),
        model: state.store.model().kind_name(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown
pub async fn run_server(
    addr: &str,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
