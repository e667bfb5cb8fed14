use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "HOTSPOT_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Env(#[from] envy::Error),
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Runtime settings for the `hotspot-optimizer` binary.
///
/// Read from `HOTSPOT_*` environment variables (a `.env` file is honoured).
/// The placement rules themselves take no configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_pretty_output")]
    pub pretty_output: bool,
}

fn default_service_name() -> String {
    "hotspot-optimizer".to_string()
}

fn default_pretty_output() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_format: LogFormat::default(),
            pretty_output: default_pretty_output(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Config>()?)
    }

    /// Same as `from_env`, over an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(vars)?)
    }
}
