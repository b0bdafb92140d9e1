//! Session configuration
//!
//! Settings are read once at session start with merge semantics:
//!
//! ```text
//! Priority (high -> low):
//! 1. CLI arguments
//! 2. Environment variables (TALLY_HISTORY_FILE, TALLY_PLUGIN_DIR)
//! 3. User-level (~/.config/tally/config.toml)
//! 4. Default values
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the history persistence file.
pub const HISTORY_FILE_ENV: &str = "TALLY_HISTORY_FILE";

/// Environment variable naming the plugin root directory.
pub const PLUGIN_DIR_ENV: &str = "TALLY_PLUGIN_DIR";

/// User-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// History persistence settings
    #[serde(default)]
    pub history: HistoryConfig,
    /// Plugin discovery settings
    #[serde(default)]
    pub plugins: PluginConfig,
    /// REPL settings
    #[serde(default)]
    pub repl: ReplSettings,
}

/// History persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryConfig {
    /// Optional path; when set, the history loads from here at startup
    /// and every mutation auto-saves back.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Plugin discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin root directory
    #[serde(default = "default_plugin_dir")]
    pub dir: PathBuf,
}

fn default_plugin_dir() -> PathBuf {
    PathBuf::from("plugins")
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            dir: default_plugin_dir(),
        }
    }
}

/// REPL configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplSettings {
    /// Prompt string
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Enable Vi editing mode
    #[serde(default)]
    pub vi_mode: bool,
}

fn default_prompt() -> String {
    "> ".to_string()
}

impl Default for ReplSettings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            vi_mode: false,
        }
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("tally"));
    }

    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("tally"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("tally"));
    }

    None
}

/// Get the user config file path (~/.config/tally/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load user-level configuration.
/// Returns defaults if no config file exists.
pub fn load_user_config() -> Result<UserConfig, ConfigError> {
    let path = match get_config_path() {
        Some(p) => p,
        None => return Ok(UserConfig::default()),
    };

    if !path.exists() {
        return Ok(UserConfig::default());
    }

    debug!("loading config from {}", path.display());
    let content = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply environment variable overrides on top of file-level settings.
pub fn apply_env_overrides(config: &mut UserConfig) {
    if let Ok(path) = std::env::var(HISTORY_FILE_ENV) {
        if !path.is_empty() {
            config.history.file = Some(PathBuf::from(path));
        }
    }

    if let Ok(dir) = std::env::var(PLUGIN_DIR_ENV) {
        if !dir.is_empty() {
            config.plugins.dir = PathBuf::from(dir);
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(std::io::Error),

    #[error("config parse error: {0}")]
    Parse(toml::de::Error),
}
