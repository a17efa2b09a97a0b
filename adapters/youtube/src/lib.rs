//! YouTube caption adapter for ytsum
//!
//! Implements [`SubtitleExtractor`] on top of the public YouTube transcript
//! endpoints via `yt-transcript-rs`.

use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, info, warn};
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};
use ytsum_core::prelude::*;

mod video_id;

pub use video_id::parse_video_id;

/// Subtitle extractor backed by YouTube's caption tracks
pub struct YouTubeSubtitleExtractor {
    api: YouTubeTranscriptApi,
    preserve_formatting: bool,
}

impl YouTubeSubtitleExtractor {
    /// Create a new extractor without cookies or proxy
    pub fn new() -> Result<Self, SubtitleError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| SubtitleError::Internal(format!("Failed to create transcript client: {}", e)))?;

        Ok(Self {
            api,
            preserve_formatting: false,
        })
    }

    /// Keep HTML formatting tags (`<i>`, `<b>`) in caption text
    pub fn with_preserve_formatting(mut self, preserve_formatting: bool) -> Self {
        self.preserve_formatting = preserve_formatting;
        self
    }
}

/// Map a transcript fetch failure onto the subtitle error it represents
fn classify_fetch_error(error: &CouldNotRetrieveTranscript, language_code: &str) -> SubtitleError {
    let message = format!("{} ({}): {}", error.video_id, language_code, error);

    match &error.reason {
        Some(CouldNotRetrieveTranscriptReason::YouTubeRequestFailed(_))
        | Some(CouldNotRetrieveTranscriptReason::IpBlocked(_))
        | Some(CouldNotRetrieveTranscriptReason::RequestBlocked(_))
        | Some(CouldNotRetrieveTranscriptReason::FailedToCreateConsentCookie) => SubtitleError::Network(message),
        Some(CouldNotRetrieveTranscriptReason::InvalidVideoId) => SubtitleError::InvalidUrl(message),
        Some(CouldNotRetrieveTranscriptReason::YouTubeDataUnparsable(_)) => SubtitleError::Internal(message),
        _ => SubtitleError::Unavailable(message),
    }
}

#[async_trait]
impl SubtitleExtractor for YouTubeSubtitleExtractor {
    async fn extract_subtitles(
        &self,
        video_url: &str,
        language_code: &str,
    ) -> Result<Option<Subtitle>, SubtitleError> {
        let video_id = parse_video_id(video_url)?;
        debug!("Fetching {} captions for video {}", language_code, video_id);
        let start_time = Instant::now();

        let transcript = self
            .api
            .fetch_transcript(&video_id, &[language_code], self.preserve_formatting)
            .await
            .map_err(|e| {
                warn!("Caption fetch for {} failed: {}", video_id, e);
                classify_fetch_error(&e, language_code)
            })?;

        let content: Vec<SubtitleFragment> = transcript
            .snippets
            .into_iter()
            .map(|snippet| SubtitleFragment::new(snippet.text).with_timing(snippet.start, snippet.duration))
            .collect();

        info!(
            "Fetched {} caption fragments for video {} in {}ms",
            content.len(),
            video_id,
            start_time.elapsed().as_millis()
        );

        Ok(Some(Subtitle {
            video_id,
            language_code: transcript.language_code,
            content,
        }))
    }
}
