// src/evaluator/mod.rs — Score extraction from agent text

pub mod parser;
pub mod scores;

pub use parser::SentencePattern;
pub use scores::{Dimension, ScoreSet};

/// Pulls a [`ScoreSet`] out of free text. Implementations must return either
/// all six numbers or nothing.
pub trait ScoreExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Option<ScoreSet>;
}
