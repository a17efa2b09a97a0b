//! Summarisation handler

use axum::{body::Bytes, extract::State, response::Json};
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;
use ytsum_core::types::SummaryRequest;
use crate::{ApiError, AppState};

/// Parse the body; an empty body or a JSON `null` yields `None`
fn parse_request(body: &[u8]) -> Result<Option<SummaryRequest>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(format!("Invalid request body: {}", e)))
}

/// Summarise a YouTube video
pub async fn summarise(State(state): State<AppState>, body: Bytes) -> Result<Json<String>, ApiError> {
    let request = parse_request(&body)?.ok_or(ApiError::NullRequest)?;

    let request_id = Uuid::new_v4();
    async move {
        debug!("Summarising {:?}", request.youtube_link_url);
        let summary = state.summariser.summarise(Some(&request)).await?;
        Ok::<_, ApiError>(Json(summary))
    }
    .instrument(info_span!("summarise", %request_id))
    .await
}
