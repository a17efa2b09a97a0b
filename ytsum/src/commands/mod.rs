//! Command implementations

pub mod serve;
pub mod summarise;

use crate::config::YtsumConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;
use ytsum_adapter_youtube::YouTubeSubtitleExtractor;
use ytsum_connector_openai::OpenAiChatProvider;
use ytsum_core::prelude::*;

/// Errors that end a command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Subtitle extractor setup failed: {0}")]
    Subtitle(#[from] SubtitleError),

    #[error("Chat connector setup failed: {0}")]
    Llm(#[from] LlmError),

    #[error("{0}")]
    Summary(#[from] SummaryError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Wire the YouTube extractor and the OpenAI connector into an orchestrator
pub fn build_summariser(config: &YtsumConfig) -> Result<Summariser, CommandError> {
    let missing = config.openai.missing_settings();
    if !missing.is_empty() {
        warn!(
            "OpenAI settings missing ({}); summaries will fail until they are configured",
            missing.join(", ")
        );
    }

    let extractor = YouTubeSubtitleExtractor::new()?;
    let provider = OpenAiChatProvider::new(config.openai.clone())?;

    Ok(Summariser::new(
        Arc::new(extractor),
        Arc::new(provider),
        config.summariser_settings(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_summariser_with_defaults() {
        let summariser = build_summariser(&YtsumConfig::default()).unwrap();
        assert_eq!(summariser.settings().deployment_name, "gpt-4o-mini");
        assert_eq!(summariser.settings().options, ChatCompletionOptions::default());
    }
}
