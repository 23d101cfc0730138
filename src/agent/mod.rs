// src/agent/mod.rs — Hosted conversational-agent client layer

pub mod client;
pub mod stream;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::errors::AppError;

pub use client::HttpAgentClient;

/// Core trait for anything that can answer a query on behalf of the agent service.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Send the query and return the fully assembled reply.
    async fn query(&self, request: &AgentRequest) -> Result<AgentReply, AppError>;
}

/// What the agent sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReply {
    pub text: String,
    /// False when a blocking response had no `answer` field and `text` is the
    /// raw payload. Scores are only extracted from real answers.
    pub answered: bool,
}

impl AgentReply {
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            answered: true,
        }
    }

    pub fn payload(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            answered: false,
        }
    }
}

/// How the agent service should deliver its answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    #[default]
    Streaming,
    Blocking,
}

impl ResponseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Streaming => "streaming",
            ResponseMode::Blocking => "blocking",
        }
    }
}

/// One outbound call to the agent service.
#[derive(Debug, Clone)]
pub struct AgentRequest {
    pub endpoint: String,
    pub api_key: String,
    pub query: String,
    pub user: String,
    pub response_mode: ResponseMode,
    /// Opaque file descriptors forwarded as-is.
    pub files: Vec<serde_json::Value>,
}

impl AgentRequest {
    /// JSON body expected by the chat-messages endpoint.
    pub fn body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "inputs": {},
            "query": self.query,
            "response_mode": self.response_mode,
            "user": self.user,
        });
        if !self.files.is_empty() {
            body["files"] = serde_json::json!(self.files);
        }
        body
    }
}
