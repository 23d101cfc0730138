// src/evaluator/parser.rs — Extract the score sentence from agent replies

use regex::Regex;

use super::scores::ScoreSet;
use super::ScoreExtractor;
use crate::infra::errors::AppError;

/// The sentence the agent is prompted to end its evaluation with.
///
/// Labels and full-width punctuation must match verbatim; the six numbers are
/// the five dimensions in spoke order followed by the total.
pub const SCORE_SENTENCE: &str = r"您的总分为：专业能力(\d+)分，逻辑分析问题能力(\d+)分，沟通表达能力(\d+)分，团队协作能力(\d+)分，学习意愿(\d+)分，总分(\d+)分。";

/// Regex-backed extractor expecting six positional integer captures.
#[derive(Debug, Clone)]
pub struct SentencePattern {
    re: Regex,
}

impl SentencePattern {
    /// Extractor for the built-in score sentence.
    pub fn new() -> Self {
        Self {
            re: Regex::new(SCORE_SENTENCE).expect("built-in score sentence compiles"),
        }
    }

    /// Extractor for a replacement pattern with exactly six capture groups.
    pub fn with_pattern(pattern: &str) -> Result<Self, AppError> {
        let re = Regex::new(pattern)
            .map_err(|e| AppError::Config(format!("Invalid score pattern: {e}")))?;

        // captures_len includes the implicit whole-match group
        let groups = re.captures_len() - 1;
        if groups != 6 {
            return Err(AppError::Config(format!(
                "Score pattern must have 6 capture groups, found {groups}"
            )));
        }

        Ok(Self { re })
    }

    pub fn as_str(&self) -> &str {
        self.re.as_str()
    }
}

impl Default for SentencePattern {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreExtractor for SentencePattern {
    fn extract(&self, text: &str) -> Option<ScoreSet> {
        let caps = self.re.captures(text)?;

        // Any group that is missing or overflows makes the whole match absent.
        let mut values = [0u32; 6];
        for (i, value) in values.iter_mut().enumerate() {
            *value = caps.get(i + 1)?.as_str().parse().ok()?;
        }

        let [professional, analytical, communication, teamwork, willingness, total] = values;
        Some(ScoreSet {
            professional,
            analytical,
            communication,
            teamwork,
            willingness,
            total,
        })
    }
}
