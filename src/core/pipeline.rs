// src/core/pipeline.rs — Agent → score extraction → radar chart

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::agent::{AgentClient, AgentReply, AgentRequest, HttpAgentClient};
use crate::chart::{ChartOutput, RadarChart};
use crate::evaluator::{ScoreExtractor, ScoreSet, SentencePattern};
use crate::infra::config::Config;
use crate::infra::errors::AppError;

/// Everything one evaluation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBundle {
    pub text: String,
    pub scores: Option<ScoreSet>,
    pub chart_base64: Option<String>,
}

pub struct EvaluationPipeline {
    agent: Arc<dyn AgentClient>,
    extractor: Arc<dyn ScoreExtractor>,
    chart: RadarChart,
    chart_path: PathBuf,
}

impl EvaluationPipeline {
    pub fn new(
        agent: Arc<dyn AgentClient>,
        extractor: Arc<dyn ScoreExtractor>,
        chart: RadarChart,
        chart_path: PathBuf,
    ) -> Self {
        Self {
            agent,
            extractor,
            chart,
            chart_path,
        }
    }

    /// Wire up the HTTP agent client, the configured extractor and the renderer.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let agent = HttpAgentClient::from_config(&config.agent)?;
        let extractor = match config.extractor.pattern.as_deref() {
            Some(pattern) => SentencePattern::with_pattern(pattern)?,
            None => SentencePattern::new(),
        };

        Ok(Self::new(
            Arc::new(agent),
            Arc::new(extractor),
            RadarChart::from_config(&config.chart),
            config.chart.output_path.clone(),
        ))
    }

    /// Path used when a chart is rendered to disk.
    pub fn chart_path(&self) -> &Path {
        &self.chart_path
    }

    /// Run one evaluation. `None` means the agent call failed; the cause is logged.
    ///
    /// With `want_chart` the chart comes back base64-encoded in the bundle;
    /// otherwise it is written to the chart path and its outcome only logged.
    pub async fn evaluate(&self, request: &AgentRequest, want_chart: bool) -> Option<ResultBundle> {
        let AgentReply { text, answered } = match self.agent.query(request).await {
            Ok(reply) => reply,
            Err(e) => {
                let timed_out = matches!(e, AppError::AgentTransport { timed_out: true, .. });
                tracing::warn!(timed_out, "Agent call failed: {}", e);
                return None;
            }
        };

        // A raw payload fallback is returned as text but never scored.
        let scores = if answered {
            self.extractor.extract(&text)
        } else {
            None
        };
        let chart_base64 = match scores {
            Some(scores) => {
                tracing::info!(total = scores.total, "Score sentence detected, rendering chart");
                self.render_chart(scores, want_chart).await
            }
            None => {
                tracing::debug!("No score sentence in agent reply");
                None
            }
        };

        Some(ResultBundle {
            text,
            scores,
            chart_base64,
        })
    }

    async fn render_chart(&self, scores: ScoreSet, want_chart: bool) -> Option<String> {
        let output = if want_chart {
            ChartOutput::Base64
        } else {
            ChartOutput::File(self.chart_path.clone())
        };

        let chart = self.chart.clone();
        match tokio::task::spawn_blocking(move || chart.render(&scores, &output)).await {
            Ok(Ok(rendered)) => rendered.into_base64(),
            Ok(Err(e)) => {
                tracing::warn!("Radar chart rendering failed: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!("Radar chart task failed: {}", e);
                None
            }
        }
    }
}
