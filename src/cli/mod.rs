// src/cli/mod.rs — CLI definition (clap derive)

pub mod chart;
pub mod evaluate;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "interview-assistant",
    about = "Interview answer evaluation via a hosted agent",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API (default)
    Serve {
        /// Bind address (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Send one answer to the agent and print the evaluation
    Evaluate {
        /// Candidate answer
        #[arg(required = true, trailing_var_arg = true)]
        answer: Vec<String>,
        /// Ask the agent for a single blocking response instead of a stream
        #[arg(long)]
        blocking: bool,
        /// Return the chart as base64 instead of writing chart.output_path
        #[arg(long)]
        base64: bool,
        /// Agent endpoint (overrides agent.endpoint)
        #[arg(long)]
        endpoint: Option<String>,
        /// Agent API key (overrides agent.api_key)
        #[arg(long)]
        api_key: Option<String>,
        /// User identifier sent to the agent
        #[arg(long)]
        user: Option<String>,
    },
    /// Render a radar chart from agent text containing the score sentence
    Chart {
        /// Agent reply text
        #[arg(required_unless_present = "scores", trailing_var_arg = true)]
        text: Vec<String>,
        /// JSON file of scores keyed by the Chinese labels (e.g. {"专业能力": 18, ..., "总分": 85})
        #[arg(long, conflicts_with = "text")]
        scores: Option<PathBuf>,
        /// Output PNG path (defaults to chart.output_path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["interview-assistant"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "interview-assistant",
            "--config",
            "cfg.toml",
            "evaluate",
            "--blocking",
            "我是",
            "AI专业学生",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("cfg.toml")));
        match cli.command {
            Some(Commands::Evaluate {
                answer, blocking, base64, ..
            }) => {
                assert_eq!(answer, vec!["我是", "AI专业学生"]);
                assert!(blocking);
                assert!(!base64);
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_evaluate_requires_answer() {
        assert!(Cli::try_parse_from(["interview-assistant", "evaluate"]).is_err());
    }

    #[test]
    fn test_parse_chart_inputs() {
        let cli = Cli::try_parse_from(["interview-assistant", "chart", "--scores", "s.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Chart { ref text, scores: Some(_), out: None }) if text.is_empty()
        ));

        assert!(Cli::try_parse_from(["interview-assistant", "chart"]).is_err());
        assert!(
            Cli::try_parse_from(["interview-assistant", "chart", "--scores", "s.json", "总分85分"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_serve_port() {
        let cli = Cli::try_parse_from(["interview-assistant", "serve", "-p", "8080"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Serve {
                port: Some(8080),
                host: None
            })
        ));
    }
}
