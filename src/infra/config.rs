// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::agent::ResponseMode;
use crate::infra::paths;

/// Environment variable overriding `agent.endpoint`.
pub const ENV_AGENT_URL: &str = "INTERVIEW_AGENT_URL";
/// Environment variable overriding `agent.api_key`.
pub const ENV_AGENT_API_KEY: &str = "INTERVIEW_AGENT_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub extractor: ExtractorConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub endpoint: String,
    pub api_key: String,
    pub user: String,
    pub response_mode: ResponseMode,
    /// Whole-request budget, including reading the streamed body.
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost/v1/chat-messages".into(),
            api_key: String::new(),
            user: "web-user".into(),
            response_mode: ResponseMode::Streaming,
            timeout_seconds: 300,
            connect_timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Replacement score sentence pattern; must have six capture groups.
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// TTF/OTF font used for labels. CJK coverage is needed for the spoke labels.
    pub font_path: Option<PathBuf>,
    pub open_after_save: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("radar_chart.png"),
            width: 1000,
            height: 1000,
            font_path: None,
            open_after_save: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_page: PathBuf,
    pub self_test_query: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            static_page: PathBuf::from("frontend_example.html"),
            self_test_query: "你好，我是人工智能专业应届毕业生，具有扎实的机器学习理论基础".into(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults, then apply env overrides.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Override agent settings from the environment. Empty values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_AGENT_URL).filter(|v| !v.trim().is_empty()) {
            self.agent.endpoint = url;
        }
        if let Some(key) = lookup(ENV_AGENT_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.agent.api_key = key;
        }
    }
}
