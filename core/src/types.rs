//! Core data types for ytsum

use serde::{Deserialize, Serialize};

/// A request to summarise a single video.
///
/// Every field is optional on the wire so that missing and `null` values reach
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// Link to the YouTube video
    #[serde(rename = "youTubeLinkUrl", alias = "youtubeLinkUrl")]
    pub youtube_link_url: Option<String>,
    /// Language of the captions to extract (e.g. "en")
    pub video_language_code: Option<String>,
    /// Language the summary should be written in (e.g. "ko")
    pub summary_language_code: Option<String>,
}

impl SummaryRequest {
    /// Create a request with all three fields set
    pub fn new(
        youtube_link_url: impl Into<String>,
        video_language_code: impl Into<String>,
        summary_language_code: impl Into<String>,
    ) -> Self {
        Self {
            youtube_link_url: Some(youtube_link_url.into()),
            video_language_code: Some(video_language_code.into()),
            summary_language_code: Some(summary_language_code.into()),
        }
    }
}

/// A request whose fields have all been checked to be present and non-blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest<'a> {
    pub youtube_link_url: &'a str,
    pub video_language_code: &'a str,
    pub summary_language_code: &'a str,
}

/// One caption line as returned by the subtitle collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleFragment {
    /// Caption text, passed through verbatim
    pub text: String,
    /// Offset from the start of the video in seconds
    pub start: f64,
    /// How long the caption is shown, in seconds
    pub duration: f64,
}

impl SubtitleFragment {
    /// Create a fragment with no timing information
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: 0.0,
            duration: 0.0,
        }
    }

    /// Set the timing of this fragment
    pub fn with_timing(mut self, start: f64, duration: f64) -> Self {
        self.start = start;
        self.duration = duration;
        self
    }
}

/// Captions extracted for one video in one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtitle {
    pub video_id: String,
    pub language_code: String,
    /// Ordered caption fragments
    pub content: Vec<SubtitleFragment>,
}

impl Subtitle {
    pub fn new(video_id: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            language_code: language_code.into(),
            content: Vec::new(),
        }
    }

    /// Append a fragment
    pub fn with_fragment(mut self, fragment: SubtitleFragment) -> Self {
        self.content.push(fragment);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Join all fragment texts with newlines, preserving order and content
    pub fn transcript(&self) -> String {
        self.content
            .iter()
            .map(|fragment| fragment.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions and context supplied by the service
    System,
    /// Payload supplied on behalf of the caller
    User,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
        }
    }
}

impl std::fmt::Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in the prompt sent to the chat collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Metadata about a chat completion call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionMetadata {
    /// Provider that served the call (e.g. "openai", "azure")
    pub provider: String,
    /// Model or deployment name
    pub model_name: String,
    /// Latency in milliseconds
    pub latency_ms: Option<u64>,
    /// Input tokens consumed
    pub input_tokens: Option<u32>,
    /// Output tokens generated
    pub output_tokens: Option<u32>,
}

/// Response from the chat collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Candidate texts, in the order the provider returned them
    pub candidates: Vec<String>,
    pub metadata: Option<CompletionMetadata>,
}

impl ChatCompletion {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: CompletionMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The first candidate text, if any
    pub fn first_candidate(&self) -> Option<&str> {
        self.candidates.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_joins_with_newline() {
        let subtitle = Subtitle::new("abc", "en")
            .with_fragment(SubtitleFragment::new("Hello"))
            .with_fragment(SubtitleFragment::new("world"));

        assert_eq!(subtitle.transcript(), "Hello\nworld");
    }

    #[test]
    fn test_transcript_is_verbatim() {
        let subtitle = Subtitle::new("abc", "en")
            .with_fragment(SubtitleFragment::new("  padded "))
            .with_fragment(SubtitleFragment::new(""))
            .with_fragment(SubtitleFragment::new("padded "));

        assert_eq!(subtitle.transcript(), "  padded \n\npadded ");
    }

    #[test]
    fn test_summary_request_wire_names() {
        let request: SummaryRequest = serde_json::from_str(
            r#"{"youTubeLinkUrl":"https://youtu.be/x","videoLanguageCode":"en","summaryLanguageCode":null}"#,
        )
        .unwrap();

        assert_eq!(request.youtube_link_url.as_deref(), Some("https://youtu.be/x"));
        assert_eq!(request.video_language_code.as_deref(), Some("en"));
        assert_eq!(request.summary_language_code, None);
    }

    #[test]
    fn test_summary_request_accepts_lowercase_alias() {
        let request: SummaryRequest =
            serde_json::from_str(r#"{"youtubeLinkUrl":"https://youtu.be/x"}"#).unwrap();

        assert_eq!(request.youtube_link_url.as_deref(), Some("https://youtu.be/x"));
        assert_eq!(request.video_language_code, None);
    }

    #[test]
    fn test_chat_role_serialization() {
        let message = ChatMessage::system("hi");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(ChatRole::User.to_string(), "user");
    }

    #[test]
    fn test_first_candidate() {
        let completion = ChatCompletion::new(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(completion.first_candidate(), Some("A"));
        assert_eq!(ChatCompletion::default().first_candidate(), None);
    }
}
