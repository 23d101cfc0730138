// src/api/handlers.rs

use crate::api::{types::*, ApiState};
use crate::core::ResultBundle;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use std::any::Any;

pub const SERVICE_NAME: &str = "interview-assistant";

/// Served from `/` when the static page cannot be read.
pub const FALLBACK_PAGE: &str = r#"<h1>Interview Assistant API</h1>
<p>Front-end page not found. Set <code>server.static_page</code> to an HTML file.</p>
<p>POST JSON such as <code>{"query": "..."}</code> to <a href="/api/interview-evaluation">/api/interview-evaluation</a>.</p>
"#;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            message: message.into(),
        }),
    )
}

/// GET / — Static front-end page, or a fallback notice.
pub async fn index(State(state): State<ApiState>) -> Html<String> {
    match tokio::fs::read_to_string(&state.static_page).await {
        Ok(page) => Html(page),
        Err(e) => {
            tracing::debug!("Static page {} unavailable: {}", state.static_page.display(), e);
            Html(FALLBACK_PAGE.to_string())
        }
    }
}

/// POST /api/interview-evaluation — Run the pipeline and return text, scores and chart.
pub async fn evaluate(
    State(state): State<ApiState>,
    body: Result<Json<EvaluationRequest>, JsonRejection>,
) -> Result<Json<ResultBundle>, ApiError> {
    let Json(body) = body.map_err(|e| {
        error(
            StatusCode::BAD_REQUEST,
            "invalid request body",
            format!("Send a JSON object: {}", e.body_text()),
        )
    })?;

    let Some(request) = body.to_agent_request(&state.agent) else {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "invalid parameter",
            "Provide a non-empty `query`",
        ));
    };

    tracing::info!(
        mode = request.response_mode.as_str(),
        user = %request.user,
        "Evaluation requested"
    );

    match state.pipeline.evaluate(&request, true).await {
        Some(bundle) => Ok(Json(bundle)),
        None => Err(error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "agent call failed",
            "Could not get an answer from the agent service",
        )),
    }
}

/// GET /api/test — Run the pipeline on the canned self-test query.
pub async fn self_test(State(state): State<ApiState>) -> Result<Json<SelfTestResponse>, ApiError> {
    let test_query = state.self_test_query.clone();
    let request = EvaluationRequest {
        query: Some(test_query.clone()),
        ..Default::default()
    }
    .to_agent_request(&state.agent)
    .ok_or_else(|| {
        error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "invalid configuration",
            "server.self_test_query is empty",
        )
    })?;

    let result = state.pipeline.evaluate(&request, true).await;

    Ok(Json(SelfTestResponse {
        status: "success".into(),
        test_query,
        result,
    }))
}

/// GET /health — Static liveness metadata.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        service: SERVICE_NAME.into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Turn a handler panic into a 500 with the panic message.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("Handler panicked: {}", message);
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error",
        message,
    )
    .into_response()
}
