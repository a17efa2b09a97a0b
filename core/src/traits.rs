//! Collaborator traits consumed by the summarisation orchestrator

use crate::errors::{LlmError, SubtitleError};
use crate::settings::ChatCompletionOptions;
use crate::types::{ChatCompletion, ChatMessage, Subtitle};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of video captions
#[async_trait]
pub trait SubtitleExtractor: Send + Sync {
    /// Extract the captions of `video_url` in `language_code`.
    ///
    /// `Ok(None)` means the call succeeded but produced nothing usable.
    async fn extract_subtitles(
        &self,
        video_url: &str,
        language_code: &str,
    ) -> Result<Option<Subtitle>, SubtitleError>;
}

/// Hands out chat clients bound to a model deployment
pub trait ChatClientProvider: Send + Sync {
    /// Get a client for `deployment_name`, failing if the provider is unconfigured
    fn chat_client(&self, deployment_name: &str) -> Result<Arc<dyn ChatClient>, LlmError>;
}

/// Trait for chat-completion connectors
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send an ordered list of messages and return the candidate texts.
    ///
    /// `Ok(None)` means the provider answered without a usable response body.
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatCompletionOptions,
    ) -> Result<Option<ChatCompletion>, LlmError>;
}
