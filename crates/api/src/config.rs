//! Runtime Settings

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration, read from `config/default.toml` (optional) and
/// overridden by `EARNINGS_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address the API server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Directory holding the training artifacts
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            artifacts_dir: default_artifacts_dir(),
        }
    }
}

impl Settings {
    /// Layered load: optional file source, then environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("EARNINGS"))
            .build()?
            .try_deserialize()
    }
}
