// Configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub steps: StepsConfig,

    #[serde(default)]
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory reports are written to
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StepsConfig {
    /// Pause after each finished step, in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Report formats to generate
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Qualifier for data-driven runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            qualifier: None,
        }
    }
}

// Default values
pub const CONFIG_FILE_NAME: &str = ".steptracerc.toml";
pub const ENV_STEP_DELAY: &str = "STEPTRACE_STEP_DELAY";

pub fn default_output_directory() -> PathBuf {
    PathBuf::from("target/steptrace")
}

fn default_formats() -> Vec<String> {
    vec![String::from("json")]
}

impl Config {
    /// Load configuration from default locations, falling back to defaults
    pub fn load() -> Self {
        // 1. .steptracerc.toml (current directory)
        // 2. ~/.steptracerc.toml (home directory)
        let candidates = [
            std::env::current_dir().ok().map(|dir| dir.join(CONFIG_FILE_NAME)),
            dirs::home_dir().map(|dir| dir.join(CONFIG_FILE_NAME)),
        ];

        for path in candidates.iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(config) => return config.with_env_overrides(),
                Err(e) => tracing::warn!("Ignoring configuration {}: {:#}", path.display(), e),
            }
        }

        Self::default().with_env_overrides()
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Applies `STEPTRACE_STEP_DELAY` (milliseconds) when it is set and valid
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = std::env::var(ENV_STEP_DELAY) {
            match value.trim().parse::<u64>() {
                Ok(delay_ms) => self.steps.delay_ms = delay_ms,
                Err(_) => tracing::warn!("Ignoring invalid {}: {}", ENV_STEP_DELAY, value),
            }
        }
        self
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.steps.delay_ms)
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
