//! Generation options and the immutable settings snapshot handed to the orchestrator

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Generation options sent with every chat completion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl ChatCompletionOptions {
    pub const DEFAULT_MAX_TOKENS: u32 = 3000;
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Resolve options from raw configuration values.
    ///
    /// Absent, empty or unparseable values fall back to the defaults.
    pub fn resolve(max_tokens: Option<&ConfigValue>, temperature: Option<&ConfigValue>) -> Self {
        let max_tokens = match max_tokens.and_then(ConfigValue::as_u32) {
            Some(value) => value,
            None => {
                if let Some(raw) = max_tokens {
                    warn!("Ignoring unparseable max_tokens {:?}, using {}", raw, Self::DEFAULT_MAX_TOKENS);
                }
                Self::DEFAULT_MAX_TOKENS
            }
        };

        let temperature = match temperature.and_then(ConfigValue::as_f32) {
            Some(value) => value,
            None => {
                if let Some(raw) = temperature {
                    warn!("Ignoring unparseable temperature {:?}, using {}", raw, Self::DEFAULT_TEMPERATURE);
                }
                Self::DEFAULT_TEMPERATURE
            }
        };

        Self { max_tokens, temperature }
    }
}

impl Default for ChatCompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }
}

/// A loosely typed configuration scalar.
///
/// Config files and environment variables may hand numbers over as strings,
/// so numeric settings are accepted in any scalar form and parsed on use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl ConfigValue {
    /// Interpret as a non-negative integer that fits in `u32`
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            ConfigValue::Integer(value) => u32::try_from(*value).ok(),
            ConfigValue::Text(text) => text.trim().parse().ok(),
            ConfigValue::Float(_) | ConfigValue::Bool(_) => None,
        }
    }

    /// Interpret as a finite float
    pub fn as_f32(&self) -> Option<f32> {
        let value = match self {
            ConfigValue::Integer(value) => *value as f32,
            ConfigValue::Float(value) => *value as f32,
            ConfigValue::Text(text) => text.trim().parse().ok()?,
            ConfigValue::Bool(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

/// Read-only settings the orchestrator is built with
#[derive(Debug, Clone, PartialEq)]
pub struct SummariserSettings {
    /// First system message of every prompt
    pub system_prompt: String,
    /// Deployment the chat client is requested for
    pub deployment_name: String,
    pub options: ChatCompletionOptions,
}

impl SummariserSettings {
    pub fn new(system_prompt: impl Into<String>, deployment_name: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            deployment_name: deployment_name.into(),
            options: ChatCompletionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChatCompletionOptions) -> Self {
        self.options = options;
        self
    }
}
