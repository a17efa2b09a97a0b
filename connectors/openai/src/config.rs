//! Configuration for the OpenAI connector

use redact::Secret;
use serde::Deserialize;

/// Wire dialect spoken by the chat-completions endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    /// `POST {endpoint}/chat/completions` with a bearer token and `model` in the body
    #[default]
    #[serde(alias = "open_ai")]
    OpenAi,
    /// `POST {endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`
    /// with an `api-key` header
    Azure,
}

impl ApiFlavor {
    pub fn provider_name(&self) -> &'static str {
        match self {
            ApiFlavor::OpenAi => "openai",
            ApiFlavor::Azure => "azure",
        }
    }
}

/// OpenAI API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API base URL (e.g. "https://api.openai.com/v1" or "https://my-resource.openai.azure.com")
    pub endpoint: String,
    /// API key, never printed
    pub api_key: Secret<String>,
    /// Model name, or deployment name for Azure
    pub deployment_name: String,
    pub flavor: ApiFlavor,
    /// `api-version` query value, Azure only
    pub api_version: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl OpenAiConfig {
    /// Create a new OpenAI config with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            ..Self::default()
        }
    }

    /// Set the API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model or deployment to use
    pub fn with_deployment_name(mut self, deployment_name: impl Into<String>) -> Self {
        self.deployment_name = deployment_name.into();
        self
    }

    /// Switch to the Azure OpenAI dialect
    pub fn with_azure(mut self, api_version: impl Into<String>) -> Self {
        self.flavor = ApiFlavor::Azure;
        self.api_version = api_version.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Names of required settings that are blank
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.endpoint.trim().is_empty() {
            missing.push("endpoint");
        }
        if self.api_key.expose_secret().trim().is_empty() {
            missing.push("api_key");
        }
        if self.flavor == ApiFlavor::Azure && self.api_version.trim().is_empty() {
            missing.push("api_version");
        }
        missing
    }

    /// Chat-completions URL for `deployment`
    pub fn completions_url(&self, deployment: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        match self.flavor {
            ApiFlavor::OpenAi => format!("{}/chat/completions", base),
            ApiFlavor::Azure => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                base, deployment, self.api_version
            ),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: Secret::new(String::new()), // Must be set by user
            deployment_name: "gpt-4o-mini".to_string(),
            flavor: ApiFlavor::OpenAi,
            api_version: "2024-06-01".to_string(),
            timeout_ms: 60_000,
        }
    }
}
