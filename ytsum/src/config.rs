//! Configuration management for ytsum

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use ytsum_connector_openai::OpenAiConfig;
use ytsum_core::errors::ConfigError;
use ytsum_core::settings::{ChatCompletionOptions, ConfigValue, SummariserSettings};
use ytsum_http::HttpConfig;

/// Prefix of environment variables read by ytsum, e.g. `YTSUM_OPENAI__API_KEY`
pub const ENV_PREFIX: &str = "YTSUM_";

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["ytsum.yaml", "ytsum.yml"];

/// Prompt settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// First system message of every prompt
    pub system: String,
    /// Integer, accepted as number or string; falls back to 3000
    pub max_tokens: Option<ConfigValue>,
    /// Float, accepted as number or string; falls back to 0.7
    pub temperature: Option<ConfigValue>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system: "You are a helpful summarisation assistant".to_string(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Process-wide configuration, loaded once at startup
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct YtsumConfig {
    pub openai: OpenAiConfig,
    pub prompt: PromptConfig,
    pub server: HttpConfig,
}

impl YtsumConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: &Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();

        // Load from default config file if it exists
        if let Some(path) = DEFAULT_CONFIG_PATHS.iter().find(|path| Path::new(path).exists()) {
            figment = figment.merge(Yaml::file(path));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            figment = figment.merge(Yaml::file(path));
        }

        // Load from environment variables, `__` separates nested keys
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply CLI argument overrides to the configuration
    pub fn with_bind_address(mut self, bind: Option<SocketAddr>) -> Self {
        if let Some(bind) = bind {
            self.server.bind_address = bind;
        }
        self
    }

    /// Resolve the immutable settings handed to the orchestrator
    pub fn summariser_settings(&self) -> SummariserSettings {
        let options =
            ChatCompletionOptions::resolve(self.prompt.max_tokens.as_ref(), self.prompt.temperature.as_ref());

        SummariserSettings::new(self.prompt.system.clone(), self.openai.deployment_name.clone())
            .with_options(options)
    }
}
