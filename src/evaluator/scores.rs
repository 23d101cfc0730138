// src/evaluator/scores.rs — Five-dimension interview score set

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::infra::errors::AppError;

/// Capability dimensions, in the order they appear in the score sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Professional,
    Analytical,
    Communication,
    Teamwork,
    Willingness,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Professional,
        Dimension::Analytical,
        Dimension::Communication,
        Dimension::Teamwork,
        Dimension::Willingness,
    ];

    /// Label used by the agent's score sentence and on the chart spokes.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Professional => "专业能力",
            Dimension::Analytical => "逻辑分析问题能力",
            Dimension::Communication => "沟通表达能力",
            Dimension::Teamwork => "团队协作能力",
            Dimension::Willingness => "学习意愿",
        }
    }
}

/// Label of the total score in label-keyed maps.
pub const TOTAL_LABEL: &str = "总分";

/// Scores parsed from one agent reply. The total is taken verbatim and never
/// checked against the sum of the dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub professional: u32,
    pub analytical: u32,
    pub communication: u32,
    pub teamwork: u32,
    pub willingness: u32,
    pub total: u32,
}

impl ScoreSet {
    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Professional => self.professional,
            Dimension::Analytical => self.analytical,
            Dimension::Communication => self.communication,
            Dimension::Teamwork => self.teamwork,
            Dimension::Willingness => self.willingness,
        }
    }

    /// Dimension scores in spoke order.
    pub fn dimensions(&self) -> [(Dimension, u32); 5] {
        Dimension::ALL.map(|d| (d, self.get(d)))
    }

    /// Build from a map keyed by the Chinese labels (`总分` for the total),
    /// such as the JSON file read by `chart --scores`.
    pub fn from_labeled(map: &HashMap<String, u32>) -> Result<Self, AppError> {
        let lookup = |label: &str| {
            map.get(label)
                .copied()
                .ok_or_else(|| AppError::MissingDimension {
                    label: label.to_string(),
                })
        };

        Ok(Self {
            professional: lookup(Dimension::Professional.label())?,
            analytical: lookup(Dimension::Analytical.label())?,
            communication: lookup(Dimension::Communication.label())?,
            teamwork: lookup(Dimension::Teamwork.label())?,
            willingness: lookup(Dimension::Willingness.label())?,
            total: lookup(TOTAL_LABEL)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(entries: &[(&str, u32)]) -> HashMap<String, u32> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_dimensions_in_spoke_order() {
        let scores = ScoreSet {
            professional: 1,
            analytical: 2,
            communication: 3,
            teamwork: 4,
            willingness: 5,
            total: 15,
        };
        let values: Vec<u32> = scores.dimensions().iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert_eq!(scores.dimensions()[1].0.label(), "逻辑分析问题能力");
    }

    #[test]
    fn test_from_labeled_complete() {
        let map = labeled(&[
            ("专业能力", 18),
            ("逻辑分析问题能力", 16),
            ("沟通表达能力", 15),
            ("团队协作能力", 17),
            ("学习意愿", 19),
            ("总分", 85),
        ]);
        let scores = ScoreSet::from_labeled(&map).unwrap();
        assert_eq!(scores.teamwork, 17);
        assert_eq!(scores.total, 85);
    }

    #[test]
    fn test_from_labeled_missing_dimension() {
        let map = labeled(&[
            ("专业能力", 18),
            ("逻辑分析问题能力", 16),
            ("沟通表达能力", 15),
            ("学习意愿", 19),
            ("总分", 85),
        ]);
        match ScoreSet::from_labeled(&map) {
            Err(AppError::MissingDimension { label }) => assert_eq!(label, "团队协作能力"),
            other => panic!("expected missing dimension, got {other:?}"),
        }
    }

    #[test]
    fn test_serializes_with_english_keys() {
        let scores = ScoreSet {
            professional: 18,
            analytical: 16,
            communication: 15,
            teamwork: 17,
            willingness: 19,
            total: 85,
        };
        let json = serde_json::to_value(scores).unwrap();
        assert_eq!(json["analytical"], 16);
        assert_eq!(json["willingness"], 19);
        assert_eq!(json["total"], 85);
    }
}
