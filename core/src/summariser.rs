//! Summarisation orchestrator: validate, extract subtitles, prompt the chat model

use crate::errors::SummaryError;
use crate::settings::SummariserSettings;
use crate::traits::{ChatClientProvider, SubtitleExtractor};
use crate::types::{ChatMessage, SummaryRequest, ValidatedRequest};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Build the instruction that tells the model how to summarise
pub fn summary_instruction(summary_language_code: &str) -> String {
    format!(
        "Here's the transcript. Summarise it in 5 bullet point items in the given language code of \"{}\".",
        summary_language_code
    )
}

/// Build the three-message prompt sent to the chat model
pub fn build_prompt(system_prompt: &str, summary_language_code: &str, transcript: String) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::system(summary_instruction(summary_language_code)),
        ChatMessage::user(transcript),
    ]
}

fn non_blank<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, SummaryError> {
    match value.as_deref() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(SummaryError::blank_field(field)),
    }
}

/// Check a request in field order, failing on the first violation
pub fn validate(request: Option<&SummaryRequest>) -> Result<ValidatedRequest<'_>, SummaryError> {
    let request = request.ok_or_else(SummaryError::missing_request)?;

    Ok(ValidatedRequest {
        youtube_link_url: non_blank(&request.youtube_link_url, "youtubeLinkUrl")?,
        video_language_code: non_blank(&request.video_language_code, "videoLanguageCode")?,
        summary_language_code: non_blank(&request.summary_language_code, "summaryLanguageCode")?,
    })
}

/// Turns a video link into a five-bullet summary using two collaborators
#[derive(Clone)]
pub struct Summariser {
    extractor: Arc<dyn SubtitleExtractor>,
    chat: Arc<dyn ChatClientProvider>,
    settings: SummariserSettings,
}

impl Summariser {
    pub fn new(
        extractor: Arc<dyn SubtitleExtractor>,
        chat: Arc<dyn ChatClientProvider>,
        settings: SummariserSettings,
    ) -> Self {
        Self {
            extractor,
            chat,
            settings,
        }
    }

    pub fn settings(&self) -> &SummariserSettings {
        &self.settings
    }

    /// Summarise the video referenced by `request`.
    ///
    /// All-or-nothing: any upstream failure or empty upstream result is an error.
    pub async fn summarise(&self, request: Option<&SummaryRequest>) -> Result<String, SummaryError> {
        let request = validate(request)?;
        let start_time = Instant::now();

        debug!(
            "Extracting {} subtitles for {}",
            request.video_language_code, request.youtube_link_url
        );
        let subtitle = self
            .extractor
            .extract_subtitles(request.youtube_link_url, request.video_language_code)
            .await
            .map_err(SummaryError::ExtractionFailed)?
            .filter(|subtitle| !subtitle.is_empty())
            .ok_or_else(|| SummaryError::EmptySubtitles {
                video: request.youtube_link_url.to_string(),
            })?;

        let transcript = subtitle.transcript();
        debug!(
            "Assembled transcript of {} fragments ({} bytes)",
            subtitle.content.len(),
            transcript.len()
        );

        let messages = build_prompt(&self.settings.system_prompt, request.summary_language_code, transcript);

        let client = self
            .chat
            .chat_client(&self.settings.deployment_name)
            .map_err(SummaryError::CompletionUnavailable)?;

        let completion = client
            .complete_chat(&messages, &self.settings.options)
            .await
            .map_err(SummaryError::CompletionFailed)?
            .ok_or(SummaryError::EmptyCompletion)?;

        if completion.candidates.len() > 1 {
            debug!("Discarding {} extra completion candidates", completion.candidates.len() - 1);
        }

        let summary = completion
            .candidates
            .into_iter()
            .next()
            .ok_or(SummaryError::EmptyCompletion)?;

        info!(
            "Summarised {} into {} in {}ms",
            request.youtube_link_url,
            request.summary_language_code,
            start_time.elapsed().as_millis()
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{LlmError, SubtitleError};
    use crate::settings::{ChatCompletionOptions, ConfigValue};
    use crate::traits::ChatClient;
    use crate::types::{ChatCompletion, ChatRole, Subtitle, SubtitleFragment};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    enum ExtractorBehaviour {
        Fragments(Vec<&'static str>),
        Absent,
        Fail,
    }

    struct FakeExtractor {
        behaviour: ExtractorBehaviour,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeExtractor {
        fn new(behaviour: ExtractorBehaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SubtitleExtractor for FakeExtractor {
        async fn extract_subtitles(
            &self,
            video_url: &str,
            language_code: &str,
        ) -> Result<Option<Subtitle>, SubtitleError> {
            self.calls
                .lock()
                .unwrap()
                .push((video_url.to_string(), language_code.to_string()));

            match &self.behaviour {
                ExtractorBehaviour::Fragments(texts) => {
                    let subtitle = texts.iter().fold(Subtitle::new("vid", language_code), |subtitle, text| {
                        subtitle.with_fragment(SubtitleFragment::new(*text))
                    });
                    Ok(Some(subtitle))
                }
                ExtractorBehaviour::Absent => Ok(None),
                ExtractorBehaviour::Fail => Err(SubtitleError::Unavailable("captions disabled".to_string())),
            }
        }
    }

    enum ChatBehaviour {
        Candidates(Vec<&'static str>),
        Absent,
        Fail,
    }

    struct FakeChat {
        behaviour: ChatBehaviour,
        configured: bool,
        provider_calls: AtomicUsize,
        requests: Mutex<Vec<(Vec<ChatMessage>, ChatCompletionOptions)>>,
    }

    impl FakeChat {
        fn new(behaviour: ChatBehaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                configured: true,
                provider_calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn unconfigured() -> Arc<Self> {
            Arc::new(Self {
                behaviour: ChatBehaviour::Absent,
                configured: false,
                provider_calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> (Vec<ChatMessage>, ChatCompletionOptions) {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    struct FakeClient(Arc<FakeChat>);

    impl ChatClientProvider for Arc<FakeChat> {
        fn chat_client(&self, _deployment_name: &str) -> Result<Arc<dyn ChatClient>, LlmError> {
            self.provider_calls.fetch_add(1, Ordering::SeqCst);
            if !self.configured {
                return Err(LlmError::NotConfigured("no endpoint".to_string()));
            }
            Ok(Arc::new(FakeClient(self.clone())))
        }
    }

    #[async_trait]
    impl ChatClient for FakeClient {
        async fn complete_chat(
            &self,
            messages: &[ChatMessage],
            options: &ChatCompletionOptions,
        ) -> Result<Option<ChatCompletion>, LlmError> {
            self.0.requests.lock().unwrap().push((messages.to_vec(), *options));

            match &self.0.behaviour {
                ChatBehaviour::Candidates(texts) => Ok(Some(ChatCompletion::new(
                    texts.iter().map(|text| text.to_string()).collect(),
                ))),
                ChatBehaviour::Absent => Ok(None),
                ChatBehaviour::Fail => Err(LlmError::Api("429 quota exceeded".to_string())),
            }
        }
    }

    fn settings() -> SummariserSettings {
        SummariserSettings::new("You are a helpful summarisation assistant", "gpt-4o-mini")
    }

    fn summariser(extractor: &Arc<FakeExtractor>, chat: &Arc<FakeChat>) -> Summariser {
        Summariser::new(extractor.clone(), Arc::new(chat.clone()), settings())
    }

    fn request() -> SummaryRequest {
        SummaryRequest::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "en", "ko")
    }

    #[tokio::test]
    async fn test_blank_fields_rejected_without_calls() {
        let extractor = FakeExtractor::new(ExtractorBehaviour::Fragments(vec!["Hello"]));
        let chat = FakeChat::new(ChatBehaviour::Candidates(vec!["A"]));
        let summariser = summariser(&extractor, &chat);

        let cases = [
            (None, None),
            (
                Some(SummaryRequest {
                    youtube_link_url: None,
                    ..request()
                }),
                Some("youtubeLinkUrl"),
            ),
            (
                Some(SummaryRequest {
                    video_language_code: Some(String::new()),
                    ..request()
                }),
                Some("videoLanguageCode"),
            ),
            (
                Some(SummaryRequest {
                    summary_language_code: Some(" \t\n".to_string()),
                    ..request()
                }),
                Some("summaryLanguageCode"),
            ),
        ];

        for (request, expected_field) in cases {
            let error = summariser.summarise(request.as_ref()).await.unwrap_err();
            assert!(matches!(error, SummaryError::InvalidRequest { .. }), "got {:?}", error);
            assert_eq!(error.field(), expected_field);
        }

        assert_eq!(extractor.call_count(), 0);
        assert_eq!(chat.provider_calls.load(Ordering::SeqCst), 0);
        assert_eq!(chat.request_count(), 0);
    }

    #[tokio::test]
    async fn test_first_violation_wins() {
        let extractor = FakeExtractor::new(ExtractorBehaviour::Absent);
        let chat = FakeChat::new(ChatBehaviour::Absent);
        let summariser = summariser(&extractor, &chat);

        let error = summariser
            .summarise(Some(&SummaryRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(error.field(), Some("youtubeLinkUrl"));
    }

    #[tokio::test]
    async fn test_extraction_failure_skips_chat() {
        let extractor = FakeExtractor::new(ExtractorBehaviour::Fail);
        let chat = FakeChat::new(ChatBehaviour::Candidates(vec!["A"]));
        let summariser = summariser(&extractor, &chat);

        let error = summariser.summarise(Some(&request())).await.unwrap_err();
        assert!(matches!(error, SummaryError::ExtractionFailed(SubtitleError::Unavailable(_))));
        assert_eq!(extractor.call_count(), 1);
        assert_eq!(chat.request_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_subtitles_skip_chat() {
        for behaviour in [ExtractorBehaviour::Fragments(vec![]), ExtractorBehaviour::Absent] {
            let extractor = FakeExtractor::new(behaviour);
            let chat = FakeChat::new(ChatBehaviour::Candidates(vec!["A"]));
            let summariser = summariser(&extractor, &chat);

            let error = summariser.summarise(Some(&request())).await.unwrap_err();
            assert!(matches!(error, SummaryError::EmptySubtitles { .. }), "got {:?}", error);
            assert_eq!(chat.provider_calls.load(Ordering::SeqCst), 0);
            assert_eq!(chat.request_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_prompt_shape() {
        let extractor = FakeExtractor::new(ExtractorBehaviour::Fragments(vec!["Hello", "world"]));
        let chat = FakeChat::new(ChatBehaviour::Candidates(vec!["A"]));
        let summariser = summariser(&extractor, &chat);

        let request = SummaryRequest::new("https://youtu.be/dQw4w9WgXcQ", "en", "pt-BR ");
        summariser.summarise(Some(&request)).await.unwrap();

        assert_eq!(
            extractor.calls.lock().unwrap()[0],
            ("https://youtu.be/dQw4w9WgXcQ".to_string(), "en".to_string())
        );

        let (messages, options) = chat.last_request();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], ChatMessage::system("You are a helpful summarisation assistant"));
        assert_eq!(messages[1].role, ChatRole::System);
        assert_eq!(
            messages[1].content,
            "Here's the transcript. Summarise it in 5 bullet point items in the given language code of \"pt-BR \"."
        );
        assert_eq!(messages[2], ChatMessage::user("Hello\nworld"));
        assert_eq!(options, ChatCompletionOptions::default());
    }

    #[tokio::test]
    async fn test_unparseable_options_reach_chat_as_defaults() {
        let extractor = FakeExtractor::new(ExtractorBehaviour::Fragments(vec!["Hello"]));
        let chat = FakeChat::new(ChatBehaviour::Candidates(vec!["A"]));
        let options = ChatCompletionOptions::resolve(
            Some(&ConfigValue::from("abc")),
            Some(&ConfigValue::from("")),
        );
        let summariser = Summariser::new(
            extractor.clone(),
            Arc::new(chat.clone()),
            settings().with_options(options),
        );

        summariser.summarise(Some(&request())).await.unwrap();

        let (_, options) = chat.last_request();
        assert_eq!(options.max_tokens, 3000);
        assert_eq!(options.temperature, 0.7);
    }

    #[tokio::test]
    async fn test_returns_first_candidate_only() {
        let extractor = FakeExtractor::new(ExtractorBehaviour::Fragments(vec!["Hello"]));
        let chat = FakeChat::new(ChatBehaviour::Candidates(vec!["A", "B"]));
        let summariser = summariser(&extractor, &chat);

        let summary = summariser.summarise(Some(&request())).await.unwrap();
        assert_eq!(summary, "A");
    }

    #[tokio::test]
    async fn test_empty_completion() {
        for behaviour in [ChatBehaviour::Candidates(vec![]), ChatBehaviour::Absent] {
            let extractor = FakeExtractor::new(ExtractorBehaviour::Fragments(vec!["Hello"]));
            let chat = FakeChat::new(behaviour);
            let summariser = summariser(&extractor, &chat);

            let error = summariser.summarise(Some(&request())).await.unwrap_err();
            assert!(matches!(error, SummaryError::EmptyCompletion), "got {:?}", error);
        }
    }

    #[tokio::test]
    async fn test_completion_failure() {
        let extractor = FakeExtractor::new(ExtractorBehaviour::Fragments(vec!["Hello"]));
        let chat = FakeChat::new(ChatBehaviour::Fail);
        let summariser = summariser(&extractor, &chat);

        let error = summariser.summarise(Some(&request())).await.unwrap_err();
        assert!(matches!(error, SummaryError::CompletionFailed(LlmError::Api(_))));
    }

    #[tokio::test]
    async fn test_unconfigured_chat_is_unavailable() {
        let extractor = FakeExtractor::new(ExtractorBehaviour::Fragments(vec!["Hello"]));
        let chat = FakeChat::unconfigured();
        let summariser = summariser(&extractor, &chat);

        let error = summariser.summarise(Some(&request())).await.unwrap_err();
        assert!(matches!(error, SummaryError::CompletionUnavailable(LlmError::NotConfigured(_))));
        assert_eq!(chat.request_count(), 0);
    }

    #[test]
    fn test_validate_borrows_fields() {
        let request = request();
        let validated = tokio_test::assert_ok!(validate(Some(&request)));
        assert_eq!(validated.youtube_link_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(validated.video_language_code, "en");
        assert_eq!(validated.summary_language_code, "ko");
    }
}
