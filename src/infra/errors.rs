// src/infra/errors.rs — Error types for the interview assistant

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // Agent errors (surfaced as an absent result by the pipeline)
    #[error("Agent request to '{endpoint}' failed: {message}")]
    AgentTransport {
        endpoint: String,
        message: String,
        timed_out: bool,
    },

    #[error("Agent returned HTTP {status}: {body}")]
    AgentStatus { status: u16, body: String },

    #[error("Agent response could not be decoded: {0}")]
    AgentResponse(String),

    // Score / chart errors
    #[error("Missing score dimension '{label}'")]
    MissingDimension { label: String },

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    // Infra
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_error_messages() {
        let transport = AppError::AgentTransport {
            endpoint: "http://agent".into(),
            message: "connection refused".into(),
            timed_out: false,
        };
        assert_eq!(
            transport.to_string(),
            "Agent request to 'http://agent' failed: connection refused"
        );
        let status = AppError::AgentStatus {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(status.to_string(), "Agent returned HTTP 502: bad gateway");
    }

    #[test]
    fn test_missing_dimension_message() {
        let err = AppError::MissingDimension {
            label: "学习意愿".into(),
        };
        assert_eq!(err.to_string(), "Missing score dimension '学习意愿'");
    }
}
