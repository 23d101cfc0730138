// src/api/mod.rs — HTTP front end for the evaluation pipeline

pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::core::EvaluationPipeline;
use crate::infra::config::{AgentConfig, Config, ServerConfig};
pub use types::EvaluationRequest;

/// Shared state for API handlers. Nothing in here is mutated per request.
#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<EvaluationPipeline>,
    /// Defaults for fields the request body leaves out.
    pub agent: AgentConfig,
    pub static_page: PathBuf,
    pub self_test_query: String,
}

impl ApiState {
    pub fn new(pipeline: Arc<EvaluationPipeline>, config: &Config) -> Self {
        Self {
            pipeline,
            agent: config.agent.clone(),
            static_page: config.server.static_page.clone(),
            self_test_query: config.server.self_test_query.clone(),
        }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/interview-evaluation", post(handlers::evaluate))
        .route("/api/test", get(handlers::self_test))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn start_server(config: &ServerConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on http://{}", listener.local_addr()?);
    tracing::info!("  GET  /                          front-end page");
    tracing::info!("  POST /api/interview-evaluation  interview evaluation");
    tracing::info!("  GET  /api/test                  canned self-test");
    tracing::info!("  GET  /health                    health check");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Could not listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down API server");
        })
        .await?;
    Ok(())
}
