// src/infra/paths.rs — Config location
//
// INTERVIEW_ASSISTANT_HOME overrides the config directory. When unset,
// config lives under ~/.interview-assistant/.

use std::path::PathBuf;

/// Returns the INTERVIEW_ASSISTANT_HOME override, if set.
fn assistant_home() -> Option<PathBuf> {
    std::env::var_os("INTERVIEW_ASSISTANT_HOME").map(PathBuf::from)
}

/// Home directory, if one can be determined.
pub fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

/// Configuration directory: $INTERVIEW_ASSISTANT_HOME/ or ~/.interview-assistant/
pub fn config_dir() -> PathBuf {
    if let Some(home) = assistant_home() {
        return home;
    }
    dirs_home()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".interview-assistant")
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
