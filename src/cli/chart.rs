// src/cli/chart.rs — `interview-assistant chart`: render without calling the agent

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::chart::{ChartOutput, RadarChart, RenderedChart};
use crate::evaluator::{ScoreExtractor, ScoreSet, SentencePattern};
use crate::infra::config::Config;

/// Where the chart command reads its scores from.
pub enum ChartInput {
    /// Agent reply text holding the score sentence.
    Text(String),
    /// JSON object keyed by the Chinese dimension labels and `总分`.
    LabeledJson(PathBuf),
}

pub fn run_chart(
    config: &Config,
    input: ChartInput,
    out: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    let scores = match input {
        ChartInput::Text(text) => scores_from_text(config, &text)?,
        ChartInput::LabeledJson(path) => scores_from_file(&path)?,
    };
    super::evaluate::print_scores(&scores);

    let path = out.unwrap_or_else(|| config.chart.output_path.clone());
    match RadarChart::from_config(&config.chart).render(&scores, &ChartOutput::File(path))? {
        RenderedChart::Saved(path) => {
            println!("Chart: {}", path.display());
            Ok(path)
        }
        RenderedChart::Encoded(_) => anyhow::bail!("Renderer returned base64 for a file request"),
    }
}

fn scores_from_text(config: &Config, text: &str) -> anyhow::Result<ScoreSet> {
    let extractor = match config.extractor.pattern.as_deref() {
        Some(pattern) => SentencePattern::with_pattern(pattern)?,
        None => SentencePattern::new(),
    };

    extractor
        .extract(text)
        .ok_or_else(|| anyhow::anyhow!("No score sentence found in the given text"))
}

fn scores_from_file(path: &Path) -> anyhow::Result<ScoreSet> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
    let labeled: HashMap<String, u32> = serde_json::from_str(&raw).map_err(|e| {
        anyhow::anyhow!("{} is not a JSON object of label to score: {e}", path.display())
    })?;
    Ok(ScoreSet::from_labeled(&labeled)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::errors::AppError;

    const SCORED: &str = "您的总分为：专业能力18分，逻辑分析问题能力16分，沟通表达能力15分，团队协作能力17分，学习意愿19分，总分85分。";

    #[test]
    fn test_chart_from_text() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("radar.png");

        let saved = run_chart(
            &Config::default(),
            ChartInput::Text(SCORED.into()),
            Some(out.clone()),
        )
        .unwrap();
        assert_eq!(saved, out);
        assert!(image::open(&out).is_ok());
    }

    #[test]
    fn test_chart_without_scores_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("radar.png");
        let result = run_chart(
            &Config::default(),
            ChartInput::Text("没有评分".into()),
            Some(out.clone()),
        );
        assert!(result.is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_chart_from_labeled_json() {
        let dir = tempfile::tempdir().unwrap();
        let scores = dir.path().join("scores.json");
        std::fs::write(
            &scores,
            r#"{"专业能力": 18, "逻辑分析问题能力": 16, "沟通表达能力": 15, "团队协作能力": 17, "学习意愿": 19, "总分": 85}"#,
        )
        .unwrap();
        let out = dir.path().join("radar.png");

        run_chart(
            &Config::default(),
            ChartInput::LabeledJson(scores),
            Some(out.clone()),
        )
        .unwrap();
        assert!(image::open(&out).is_ok());
    }

    #[test]
    fn test_labeled_json_missing_dimension() {
        let dir = tempfile::tempdir().unwrap();
        let scores = dir.path().join("scores.json");
        std::fs::write(&scores, r#"{"专业能力": 18, "总分": 85}"#).unwrap();

        let err = scores_from_file(&scores).unwrap_err();
        match err.downcast_ref::<AppError>() {
            Some(AppError::MissingDimension { label }) => assert_eq!(label, "逻辑分析问题能力"),
            other => panic!("expected missing dimension, got {other:?}"),
        }
    }

    #[test]
    fn test_labeled_json_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let scores = dir.path().join("scores.json");
        std::fs::write(&scores, "[18, 16]").unwrap();
        assert!(scores_from_file(&scores).is_err());
    }
}
