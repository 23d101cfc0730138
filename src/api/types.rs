// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::agent::{AgentRequest, ResponseMode};
use crate::core::ResultBundle;
use crate::infra::config::AgentConfig;

/// Request body for an interview evaluation. Only `query` is required; the
/// rest fall back to the `[agent]` config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub response_mode: Option<ResponseMode>,
}

impl EvaluationRequest {
    /// The trimmed query, or `None` when missing or blank.
    pub fn query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Resolve into an outbound agent call, or `None` without a usable query.
    pub fn to_agent_request(&self, defaults: &AgentConfig) -> Option<AgentRequest> {
        let query = self.query()?;
        Some(AgentRequest {
            endpoint: self
                .api_url
                .clone()
                .unwrap_or_else(|| defaults.endpoint.clone()),
            api_key: self
                .api_key
                .clone()
                .unwrap_or_else(|| defaults.api_key.clone()),
            query: query.to_string(),
            user: self.user.clone().unwrap_or_else(|| defaults.user.clone()),
            response_mode: self.response_mode.unwrap_or(defaults.response_mode),
            files: self.files.clone().unwrap_or_default(),
        })
    }
}

/// Response of the canned self-test route.
#[derive(Debug, Serialize)]
pub struct SelfTestResponse {
    pub status: String,
    pub test_query: String,
    pub result: Option<ResultBundle>,
}

/// Static liveness metadata.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
