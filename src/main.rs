// src/main.rs — interview-assistant entry point

use clap::Parser;

use interview_assistant::chart;
use interview_assistant::cli::chart::ChartInput;
use interview_assistant::cli::evaluate::EvaluateArgs;
use interview_assistant::cli::{Cli, Commands};
use interview_assistant::infra::config::Config;
use interview_assistant::infra::logger;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        let mut config = Config::load_from(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    } else {
        Config::load()?
    };

    if let Some(ref font) = config.chart.font_path {
        if let Err(e) = chart::register_font_file(font) {
            tracing::warn!("Chart font not loaded: {}", e);
        }
    }
    // Charts still render without a font, but with no title, labels or legend.
    if chart::ensure_font().is_none() {
        tracing::warn!(
            "No chart font found; set chart.font_path to a CJK TTF/OTF file to get chart text"
        );
    }

    match cli.command {
        None => interview_assistant::cli::serve::run_serve(config, None, None).await,
        Some(Commands::Serve { host, port }) => {
            interview_assistant::cli::serve::run_serve(config, host, port).await
        }
        Some(Commands::Evaluate {
            answer,
            blocking,
            base64,
            endpoint,
            api_key,
            user,
        }) => {
            let args = EvaluateArgs {
                answer: answer.join(" "),
                blocking,
                base64,
                endpoint,
                api_key,
                user,
            };
            interview_assistant::cli::evaluate::run_evaluate(&config, args).await
        }
        Some(Commands::Chart { text, scores, out }) => {
            let input = match scores {
                Some(path) => ChartInput::LabeledJson(path),
                None => ChartInput::Text(text.join(" ")),
            };
            interview_assistant::cli::chart::run_chart(&config, input, out).map(|_| ())
        }
    }
}
