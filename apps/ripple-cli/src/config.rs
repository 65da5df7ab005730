//! Layered CLI configuration.

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use ripple_rest::RippleClientConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix; `RIPPLE__CLIENT__SERVER_URL` maps to `client.server_url`.
pub const ENV_PREFIX: &str = "RIPPLE__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub client: RippleClientConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when neither `-v` nor `RUST_LOG` is given.
    #[serde(default = "default_level")]
    pub level: String,
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub server_url: Option<&'a str>,
    pub allow_insecure_http: bool,
    pub log_json: bool,
}

impl CliConfig {
    /// defaults -> YAML file (if given) -> `RIPPLE__*` environment.
    ///
    /// # Errors
    /// Fails when the file cannot be read or a layer does not fit the schema.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().context("failed to load configuration")
    }

    pub fn apply_cli_overrides(&mut self, overrides: &CliOverrides<'_>) {
        if let Some(url) = overrides.server_url {
            url.clone_into(&mut self.client.server_url);
        }
        if overrides.allow_insecure_http {
            self.client.allow_insecure_http = true;
        }
        if overrides.log_json {
            self.logging.format = LogFormat::Json;
        }
    }

    /// # Errors
    /// Fails if YAML serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to serialize configuration to YAML")
    }
}
