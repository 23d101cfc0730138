// src/agent/client.rs — HTTP client for the chat-messages endpoint

use async_trait::async_trait;
use futures::TryStreamExt;
use std::time::Duration;

use super::stream::{collect_answer, split_lines};
use super::{AgentClient, AgentReply, AgentRequest, ResponseMode};
use crate::infra::config::AgentConfig;
use crate::infra::errors::AppError;

pub struct HttpAgentClient {
    client: reqwest::Client,
}

impl HttpAgentClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with the timeouts from `[agent]`.
    pub fn from_config(config: &AgentConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::new(client))
    }

    fn transport_error(endpoint: &str, e: reqwest::Error) -> AppError {
        AppError::AgentTransport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
            timed_out: e.is_timeout(),
        }
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn query(&self, request: &AgentRequest) -> Result<AgentReply, AppError> {
        let endpoint = request.endpoint.as_str();

        tracing::debug!(
            endpoint,
            mode = request.response_mode.as_str(),
            files = request.files.len(),
            "Calling agent"
        );

        let response = self
            .client
            .post(endpoint)
            .header("Authorization", format!("Bearer {}", request.api_key))
            .json(&request.body())
            .send()
            .await
            .map_err(|e| Self::transport_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AgentStatus {
                status: status.as_u16(),
                body,
            });
        }

        match request.response_mode {
            ResponseMode::Streaming => {
                let chunks = response
                    .bytes_stream()
                    .map_err(|e| Self::transport_error(endpoint, e));
                let answer = collect_answer(split_lines(chunks)).await?;
                tracing::debug!(chars = answer.chars().count(), "Agent stream complete");
                Ok(AgentReply::answer(answer))
            }
            ResponseMode::Blocking => {
                let payload: serde_json::Value = response.json().await.map_err(|e| {
                    if e.is_decode() {
                        AppError::AgentResponse(e.to_string())
                    } else {
                        Self::transport_error(endpoint, e)
                    }
                })?;
                Ok(blocking_answer(payload))
            }
        }
    }
}

/// The `answer` field of a blocking response, or the whole payload when absent.
pub fn blocking_answer(payload: serde_json::Value) -> AgentReply {
    match payload.get("answer").and_then(|a| a.as_str()) {
        Some(answer) => AgentReply::answer(answer),
        None => {
            tracing::debug!("Blocking response has no answer field");
            AgentReply::payload(payload.to_string())
        }
    }
}
