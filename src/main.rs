//! Insurance Supervision Server
//!
//! Risk-scoring dashboard for insurance regulators.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 INSURANCE SUPERVISION                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Workbook ──► Loader ──► Scaler ──► Random Forest           │
//! │                                        │ (fit + predict)     │
//! │                                        ▼                     │
//! │                              Scored portfolio (Session)      │
//! │                          ┌─────────────┴─────────────┐       │
//! │                          ▼                           ▼       │
//! │                   Dashboard (Axum)          Report Assembler │
//! │                                                      │       │
//! │                                     Narrative ◄──────┘       │
//! │                                     (text-generation API)    │
//! │                                              │               │
//! │                                              ▼               │
//! │                                        .docx download        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod logic;
mod view;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::Mutex;
use tower_http::{
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};
use logic::{GeneratedReport, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "insurance_supervision=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env();

    tracing::info!("Insurance Supervision Server starting...");
    tracing::info!(
        "Dataset: {}, forest: {} trees (seed {}), narrative model: {}",
        config.dataset_path.display(),
        config.forest_trees,
        config.forest_seed,
        config.narrative_model
    );
    if config.openai_api_key.is_none() {
        if config.is_production() {
            tracing::error!("OPENAI_API_KEY is not set: every narrative will be a placeholder");
        } else {
            tracing::warn!("OPENAI_API_KEY is not set: narratives will be placeholders");
        }
    }

    // Load, scale, fit, score. Nothing is served if this fails.
    let session = Session::bootstrap(&config).map_err(|e| {
        tracing::error!("Startup failed: {}", e);
        e
    }).context("cannot build the scoring session")?;

    let state = AppState::new(session);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
    /// Last written report; locked for the whole generation
    pub latest_report: Arc<Mutex<Option<GeneratedReport>>>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(session),
            latest_report: Arc::new(Mutex::new(None)),
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Dashboard (HTML)
    let view_routes = Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/charts/solvency.svg", get(handlers::dashboard::solvency_svg))
        .route("/reports", post(handlers::reports::create_from_form))
        .route("/reports/download", get(handlers::reports::download));

    // JSON API
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/companies", get(handlers::companies::list))
        .route("/api/v1/companies/:index", get(handlers::companies::get))
        .route("/api/v1/model", get(handlers::companies::model))
        .route("/api/v1/reports", post(handlers::reports::create));

    Router::new()
        .merge(view_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
