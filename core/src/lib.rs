//! # ytsum Core
//!
//! Core types, collaborator traits, and the summarisation orchestrator for ytsum.
//! Subtitle extraction and chat completion are provided by adapter and connector
//! crates implementing the traits defined here.

pub mod types;
pub mod traits;
pub mod errors;
pub mod settings;
pub mod summariser;

// Re-export commonly used types and traits
pub use types::{ChatCompletion, ChatMessage, ChatRole, Subtitle, SubtitleFragment, SummaryRequest};
pub use traits::{ChatClient, ChatClientProvider, SubtitleExtractor};
pub use errors::{ConfigError, LlmError, SubtitleError, SummaryError};
pub use settings::{ChatCompletionOptions, ConfigValue, SummariserSettings};
pub use summariser::Summariser;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::traits::*;
    pub use crate::errors::*;
    pub use crate::settings::*;
    pub use crate::summariser::*;
    pub use async_trait::async_trait;
}
