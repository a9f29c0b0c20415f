#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::SkillError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub skill: SkillConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Skill settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Application id requests must be addressed to. Unset = accept all.
    #[serde(default)]
    pub skill_id: Option<String>,
    /// Language used when the request's own language cannot be served.
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Extra `<language>.toml` string tables, merged over the bundled ones.
    #[serde(default)]
    pub locales_dir: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            skill_id: None,
            default_language: default_language(),
            locales_dir: None,
            log_level: default_log_level(),
        }
    }
}

/// HTTP endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
    /// Bearer token for the skill endpoint. Empty = no auth (for local-only use).
    #[serde(default)]
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
            api_key: String::new(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, SkillError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| SkillError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| SkillError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}

// --- Default value functions ---

fn default_name() -> String {
    "Hello World".to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_api_host() -> String {
    "127.0.0.1".to_string()
}
fn default_api_port() -> u16 {
    3000
}
