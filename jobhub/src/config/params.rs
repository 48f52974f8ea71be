use std::path::Path;
use std::time::Duration;

use tracing::debug;
use url::Url;

use super::{JobHubConfig, JobHubConfigVersioned};
use crate::board::BoardSettings;
use crate::cli::api::ApiCliArgs;
use crate::cli::board::BoardCliArgs;
use crate::error::ConfigError;

/// Fully resolved settings. Command-line values (and their `JOBHUB_*` env fallbacks) win over the
/// config file, which wins over built-in defaults.
#[derive(Debug, Clone)]
pub struct JobHubParams {
    pub api_base_url: Url,
    pub id_token: String,
    pub request_timeout: Duration,
    pub board: BoardSettings,
}

impl JobHubParams {
    pub fn resolve(api: &ApiCliArgs, board: &BoardCliArgs, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file");
                JobHubConfigVersioned::from_yaml_file(path)?.into_canonical()
            }
            None => JobHubConfig::default(),
        };
        Self::merge(api, board, config)
    }

    pub fn merge(api: &ApiCliArgs, board: &BoardCliArgs, config: JobHubConfig) -> Result<Self, ConfigError> {
        let api_base_url = api.api_url.clone().or(config.api.base_url).ok_or(ConfigError::Missing("api base url"))?;
        let id_token = api
            .id_token
            .clone()
            .or(config.api.id_token)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("identity token"))?;

        let request_timeout_seconds = api.request_timeout_seconds.unwrap_or(config.api.request_timeout_seconds);
        if request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid { field: "request_timeout_seconds", message: "must be positive".into() });
        }

        let items_per_page = board.items_per_page.unwrap_or(config.board.items_per_page);
        if items_per_page == 0 {
            return Err(ConfigError::Invalid { field: "items_per_page", message: "must be positive".into() });
        }
        let search_debounce_ms = board.search_debounce_ms.unwrap_or(config.board.search_debounce_ms);

        Ok(Self {
            api_base_url,
            id_token,
            request_timeout: Duration::from_secs(request_timeout_seconds),
            board: BoardSettings { items_per_page, search_debounce: Duration::from_millis(search_debounce_ms) },
        })
    }
}
