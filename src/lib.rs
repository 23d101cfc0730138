// src/lib.rs — Library root for the interview assistant

pub mod agent;
pub mod api;
pub mod chart;
pub mod cli;
pub mod core;
pub mod evaluator;
pub mod infra;
