// src/cli/serve.rs — `interview-assistant serve`

use std::sync::Arc;

use crate::api::{self, ApiState};
use crate::core::EvaluationPipeline;
use crate::infra::config::Config;

pub async fn run_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    if config.agent.api_key.is_empty() {
        tracing::warn!(
            "No agent API key configured; requests must supply `api_key` (or set {})",
            crate::infra::config::ENV_AGENT_API_KEY
        );
    }

    let pipeline = Arc::new(EvaluationPipeline::from_config(&config)?);
    let state = ApiState::new(pipeline, &config);
    api::start_server(&config.server, state).await
}
