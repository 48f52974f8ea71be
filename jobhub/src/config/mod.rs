pub mod env_interpolation;
pub mod params;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::query::DEFAULT_ITEMS_PER_PAGE;
pub use params::JobHubParams;

pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Versioned configuration wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "config_version")]
pub enum JobHubConfigVersioned {
    #[serde(rename = "1")]
    V1(JobHubConfigV1),
}

impl JobHubConfigVersioned {
    /// Load configuration from a YAML file, interpolating `${VAR}` references first
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let content = env_interpolation::interpolate_yaml_content(&content)
            .with_context(|| format!("Failed to interpolate config file: {}", path.display()))?;

        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content).context("Failed to parse YAML")?;

        if yaml_value.get("config_version").is_none() {
            anyhow::bail!(
                "Missing required field 'config_version' in config file. \
                 Current supported version: 1"
            );
        }

        serde_yaml::from_str(content).context("Failed to deserialize config")
    }

    pub fn into_canonical(self) -> JobHubConfig {
        match self {
            JobHubConfigVersioned::V1(v1) => v1,
        }
    }
}

/// Canonical configuration (always latest version internally)
pub type JobHubConfig = JobHubConfigV1;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobHubConfigV1 {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<Url>,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    pub id_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: None, request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS, id_token: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { items_per_page: DEFAULT_ITEMS_PER_PAGE, search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS }
    }
}

fn default_request_timeout_seconds() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECONDS
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v1_with_defaults() {
        let config = JobHubConfigVersioned::from_yaml_str(
            r#"
config_version: "1"
api:
  base_url: https://jobs.example.com/dev
"#,
        )
        .unwrap()
        .into_canonical();

        assert_eq!(config.api.base_url.unwrap().as_str(), "https://jobs.example.com/dev");
        assert_eq!(config.api.request_timeout_seconds, 30);
        assert_eq!(config.board.items_per_page, 9);
        assert_eq!(config.board.search_debounce_ms, 300);
    }

    #[test]
    fn rejects_missing_version() {
        let error = JobHubConfigVersioned::from_yaml_str("api: {}\n").unwrap_err();
        assert!(error.to_string().contains("config_version"));
    }

    #[test]
    fn rejects_unknown_version() {
        assert!(JobHubConfigVersioned::from_yaml_str("config_version: \"2\"\n").is_err());
    }
}
