//! Video id extraction from the many shapes a YouTube link can take

use reqwest::Url;
use ytsum_core::errors::SubtitleError;

const VIDEO_ID_LEN: usize = 11;

const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

const ID_PATH_PREFIXES: &[&str] = &["shorts", "embed", "live", "v"];

fn is_video_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Extract the 11-character video id from a YouTube URL or a bare id.
///
/// Accepts `watch?v=`, `youtu.be/`, `shorts/`, `embed/`, `live/` and `v/` links,
/// with or without a scheme.
pub fn parse_video_id(input: &str) -> Result<String, SubtitleError> {
    let input = input.trim();
    if is_video_id(input) {
        return Ok(input.to_string());
    }

    let url = Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{}", input)))
        .map_err(|e| SubtitleError::InvalidUrl(format!("{}: {}", input, e)))?;

    let host = url
        .host_str()
        .ok_or_else(|| SubtitleError::InvalidUrl(format!("{}: missing host", input)))?
        .to_ascii_lowercase();

    let mut segments = url.path_segments().map(|s| s.collect::<Vec<_>>()).unwrap_or_default();
    segments.retain(|segment| !segment.is_empty());

    let candidate = if host == "youtu.be" {
        segments.first().map(|id| id.to_string())
    } else if YOUTUBE_HOSTS.contains(&host.as_str()) {
        match segments.as_slice() {
            ["watch"] => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            [prefix, id, ..] if ID_PATH_PREFIXES.contains(prefix) => Some(id.to_string()),
            _ => None,
        }
    } else {
        return Err(SubtitleError::InvalidUrl(format!("{}: not a YouTube host", input)));
    };

    match candidate {
        Some(id) if is_video_id(&id) => Ok(id),
        _ => Err(SubtitleError::InvalidUrl(format!("{}: no video id found", input))),
    }
}
