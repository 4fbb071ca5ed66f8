use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod paths;
pub use paths::{config_file, default_token_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

#[derive(Debug, Deserialize)]
pub struct Config {
    api: Api,
    #[serde(default)]
    session: SessionConfig,
}

#[derive(Debug, Deserialize)]
pub struct Api {
    base_url: String,
    #[serde(default = "Api::default_timeout_secs")]
    timeout_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionConfig {
    token_file: Option<PathBuf>,
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let raw = read_config(use_local)?;
                    let config: Self = toml::from_str(&raw)?;
                    Ok(config)
                };

                let config = match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        if !matches!(e, error::ConfigError::ConfigNotFound) {
                            crate::error::log_error(&e);
                        }
                        tracing::error!("Config not found.");
                        std::process::exit(1);
                    }
                };

                config
            })
            .await
    }

    #[inline]
    pub fn api(&self) -> &Api {
        &self.api
    }

    #[inline]
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }
}

impl Api {
    fn default_timeout_secs() -> u64 {
        20
    }

    /// Base URL with any trailing slash removed, so paths can always be
    /// appended as `/courses`.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SessionConfig {
    /// Where the session token lives: the configured override, or the
    /// platform default next to the config file.
    pub fn token_file(&self) -> PathBuf {
        match &self.token_file {
            Some(path) => path.clone(),
            None => default_token_file(),
        }
    }
}
