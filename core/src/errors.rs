//! Error types for ytsum core operations

use thiserror::Error;

/// Errors returned by the summarisation orchestrator
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Offending field, by its wire name. `None` when the request itself is missing.
        field: Option<&'static str>,
        message: String,
    },

    #[error("Subtitle extraction failed: {0}")]
    ExtractionFailed(#[source] SubtitleError),

    #[error("No subtitles were returned for {video}")]
    EmptySubtitles { video: String },

    #[error("Chat completion client unavailable: {0}")]
    CompletionUnavailable(#[source] LlmError),

    #[error("Chat completion failed: {0}")]
    CompletionFailed(#[source] LlmError),

    #[error("Chat completion returned no candidates")]
    EmptyCompletion,
}

impl SummaryError {
    /// The request itself was absent
    pub fn missing_request() -> Self {
        SummaryError::InvalidRequest {
            field: None,
            message: "Request cannot be null".to_string(),
        }
    }

    /// A required field was absent, empty or whitespace-only
    pub fn blank_field(field: &'static str) -> Self {
        SummaryError::InvalidRequest {
            field: Some(field),
            message: format!("{} must not be null or blank", field),
        }
    }

    /// Whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, SummaryError::InvalidRequest { .. })
    }

    /// Stable machine-readable name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            SummaryError::InvalidRequest { .. } => "invalid_request",
            SummaryError::ExtractionFailed(_) => "extraction_failed",
            SummaryError::EmptySubtitles { .. } => "empty_subtitles",
            SummaryError::CompletionUnavailable(_) => "completion_unavailable",
            SummaryError::CompletionFailed(_) => "completion_failed",
            SummaryError::EmptyCompletion => "empty_completion",
        }
    }

    /// Offending field for `InvalidRequest`
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SummaryError::InvalidRequest { field, .. } => *field,
            _ => None,
        }
    }
}

/// Errors related to subtitle extraction
#[derive(Error, Debug)]
pub enum SubtitleError {
    #[error("Invalid video URL: {0}")]
    InvalidUrl(String),

    #[error("Subtitles unavailable: {0}")]
    Unavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal subtitle extractor error: {0}")]
    Internal(String),
}

/// Errors related to chat completion connectors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Chat client not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error from LLM provider: {0}")]
    Api(String),

    #[error("Timeout during LLM call")]
    Timeout,

    #[error("Failed to parse LLM response: {0}")]
    ResponseParse(String),
}

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}
