//! OpenAI connector for ytsum chat completions

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use ytsum_core::prelude::*;
use ytsum_core::types::CompletionMetadata;

mod config;
mod models;

/// Longest slice of a raw upstream error body kept in error messages
const MAX_ERROR_BODY_BYTES: usize = 512;

pub use config::{ApiFlavor, OpenAiConfig};
use models::*;

/// Hands out chat clients that share one HTTP connection pool
pub struct OpenAiChatProvider {
    client: Client,
    config: Arc<OpenAiConfig>,
}

impl OpenAiChatProvider {
    /// Create a new provider
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| LlmError::NotConfigured(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

impl ChatClientProvider for OpenAiChatProvider {
    fn chat_client(&self, deployment_name: &str) -> Result<Arc<dyn ChatClient>, LlmError> {
        let mut missing = self.config.missing_settings();
        if deployment_name.trim().is_empty() {
            missing.push("deployment_name");
        }
        if !missing.is_empty() {
            return Err(LlmError::NotConfigured(format!(
                "missing OpenAI settings: {}",
                missing.join(", ")
            )));
        }

        Ok(Arc::new(OpenAiChatClient {
            client: self.client.clone(),
            config: self.config.clone(),
            deployment: deployment_name.to_string(),
        }))
    }
}

/// Chat client bound to a single model or deployment
pub struct OpenAiChatClient {
    client: Client,
    config: Arc<OpenAiConfig>,
    deployment: String,
}

impl OpenAiChatClient {
    /// Build the JSON body for a chat-completions call
    fn build_request<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        options: &ChatCompletionOptions,
    ) -> ChatCompletionRequest<'a> {
        let model = match self.config.flavor {
            ApiFlavor::OpenAi => Some(self.deployment.as_str()),
            ApiFlavor::Azure => None,
        };

        ChatCompletionRequest {
            model,
            messages: messages
                .iter()
                .map(|message| OpenAiMessage {
                    role: message.role.as_str(),
                    content: &message.content,
                })
                .collect(),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let api_key = self.config.api_key.expose_secret();
        match self.config.flavor {
            ApiFlavor::OpenAi => request.bearer_auth(api_key),
            ApiFlavor::Azure => request.header("api-key", api_key),
        }
    }

    /// Turn a non-success body into a readable message
    fn describe_api_error(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<OpenAiError>(body) {
            Ok(parsed) => match parsed.error.code {
                Some(code) => format!("{} ({}): {}", status, code, truncate_body(&parsed.error.message)),
                None => format!("{}: {}", status, truncate_body(&parsed.error.message)),
            },
            Err(_) if body.trim().is_empty() => status.to_string(),
            Err(_) => format!("{}: {}", status, truncate_body(body)),
        }
    }

    /// Collect candidate texts in choice order, stopping at the first choice without content
    fn parse_completion(&self, body: &str, latency_ms: u64) -> Result<Option<ChatCompletion>, LlmError> {
        if body.trim().is_empty() {
            return Ok(None);
        }

        let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
            error!("Failed to parse chat completion response: {}", e);
            LlmError::ResponseParse(format!("Failed to parse response: {}", e))
        })?;

        let mut choices = response.choices;
        choices.sort_by_key(|choice| choice.index);
        let total = choices.len();
        let candidates: Vec<String> = choices
            .into_iter()
            .map_while(|choice| choice.message.and_then(|message| message.content))
            .collect();
        if candidates.len() < total {
            warn!(
                "Chat completion on {} returned {} of {} choices without content",
                self.deployment,
                total - candidates.len(),
                total
            );
        }

        let metadata = CompletionMetadata {
            provider: self.config.flavor.provider_name().to_string(),
            model_name: response.model.unwrap_or_else(|| self.deployment.clone()),
            latency_ms: Some(latency_ms),
            input_tokens: response.usage.as_ref().map(|u| u.prompt_tokens),
            output_tokens: response.usage.as_ref().map(|u| u.completion_tokens),
        };

        Ok(Some(ChatCompletion::new(candidates).with_metadata(metadata)))
    }
}

fn truncate_body(body: &str) -> &str {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body;
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatCompletionOptions,
    ) -> Result<Option<ChatCompletion>, LlmError> {
        debug!(
            "Starting {} chat completion on {} with {} messages",
            self.config.flavor.provider_name(),
            self.deployment,
            messages.len()
        );
        let start_time = Instant::now();

        let request = self.build_request(messages, options);

        // Make the API call
        let response = self
            .authorize(self.client.post(self.config.completions_url(&self.deployment)))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Network(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = Self::describe_api_error(status, &body);
            error!("Chat completion on {} failed: {}", self.deployment, message);
            return Err(LlmError::Api(message));
        }

        let latency = start_time.elapsed();
        let completion = self.parse_completion(&body, latency.as_millis() as u64)?;

        if let Some(metadata) = completion.as_ref().and_then(|c| c.metadata.as_ref()) {
            info!(
                "Chat completion on {} finished in {}ms (input tokens: {:?}, output tokens: {:?})",
                metadata.model_name,
                latency.as_millis(),
                metadata.input_tokens,
                metadata.output_tokens
            );
        }

        Ok(completion)
    }
}
