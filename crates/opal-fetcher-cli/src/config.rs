use std::path::{Path, PathBuf};

use opal_fetcher_mongo::MongoProviderOptions;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
///
/// ```toml
/// [mongo]
/// auth_mechanism = "SCRAM-SHA-256"
/// connect_timeout_secs = 5
/// query_timeout_secs = 60
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mongo: MongoProviderOptions,
}

/// Config file path: `~/.config/opal-fetcher/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("opal-fetcher").join("config.toml"))
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Load config from an explicit path, or from the default location.
///
/// A missing file yields defaults. A malformed file logs a warning and
/// also yields defaults.
pub fn load_config(explicit: Option<&Path>) -> AppConfig {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(config_path) else {
        return AppConfig::default();
    };

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            if explicit.is_some() {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read config, using defaults"
                );
            }
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to parse config, using defaults"
            );
            AppConfig::default()
        }
    }
}
