// src/core/mod.rs

pub mod pipeline;

pub use pipeline::{EvaluationPipeline, ResultBundle};
