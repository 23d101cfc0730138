// src/cli/evaluate.rs — One-shot evaluation and chart rendering from the terminal

use std::path::PathBuf;

use crate::agent::{AgentRequest, ResponseMode};
use crate::core::{EvaluationPipeline, ResultBundle};
use crate::evaluator::ScoreSet;
use crate::infra::config::Config;

/// Options for `interview-assistant evaluate`.
pub struct EvaluateArgs {
    pub answer: String,
    pub blocking: bool,
    pub base64: bool,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub user: Option<String>,
}

impl EvaluateArgs {
    fn to_agent_request(&self, config: &Config) -> AgentRequest {
        AgentRequest {
            endpoint: self
                .endpoint
                .clone()
                .unwrap_or_else(|| config.agent.endpoint.clone()),
            api_key: self
                .api_key
                .clone()
                .unwrap_or_else(|| config.agent.api_key.clone()),
            query: self.answer.trim().to_string(),
            user: self.user.clone().unwrap_or_else(|| config.agent.user.clone()),
            response_mode: if self.blocking {
                ResponseMode::Blocking
            } else {
                config.agent.response_mode
            },
            files: Vec::new(),
        }
    }
}

pub async fn run_evaluate(config: &Config, args: EvaluateArgs) -> anyhow::Result<()> {
    let answer = args.answer.trim();
    if answer.is_empty() {
        anyhow::bail!("No answer provided");
    }

    let pipeline = EvaluationPipeline::from_config(config)?;
    let request = args.to_agent_request(config);

    eprintln!("Calling agent ({} mode)...", request.response_mode.as_str());
    let bundle = pipeline
        .evaluate(&request, args.base64)
        .await
        .ok_or_else(|| anyhow::anyhow!("Agent call failed (see log for details)"))?;

    let saved_to = (!args.base64).then(|| pipeline.chart_path().to_path_buf());
    print_bundle(&bundle, saved_to);
    Ok(())
}

fn print_bundle(bundle: &ResultBundle, saved_to: Option<PathBuf>) {
    println!("{}", bundle.text);
    println!();

    match &bundle.scores {
        Some(scores) => {
            print_scores(scores);
            if let Some(ref chart) = bundle.chart_base64 {
                println!("Chart: {} base64 characters", chart.len());
            } else if let Some(path) = saved_to.filter(|p| p.exists()) {
                println!("Chart: {}", path.display());
            }
        }
        None => println!("No score sentence found in the reply."),
    }
}

pub(crate) fn print_scores(scores: &ScoreSet) {
    for (dimension, value) in scores.dimensions() {
        println!("  {:<10} {:>3}", dimension.label(), value);
    }
    println!("  {:<10} {:>3}", crate::evaluator::scores::TOTAL_LABEL, scores.total);
}
