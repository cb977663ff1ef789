use axum::{Json, body::Bytes, extract::State};
use std::time::Instant;

use crate::data_models::SearchRequest;
use crate::error::{ApiError, EngineError};
use crate::replies::ReplyBatch;
use crate::search_client::DocumentSearch;

use super::AppState;

pub async fn ok_handler() -> &'static str {
    "OK"
}

/// Accepts the chat-bot payload regardless of content type. Upstream trouble
/// never fails the request; it shows up as fallback replies instead.
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<Json<ReplyBatch>, ApiError>
where
    S: DocumentSearch + 'static,
{
    let start = Instant::now();

    let request: SearchRequest = serde_json::from_slice(&body).map_err(|e| {
        log::warn!("rejecting malformed search request: {}", e);
        ApiError::from(e)
    })?;

    let batch = state
        .engine
        .aggregate_until_cancelled(&request, &state.shutdown)
        .await
        .map_err(|EngineError::Cancelled| ApiError::ShuttingDown)?;

    log::info!(
        "search {:?} as {} -> {} replies in {}ms",
        request.query(),
        request.reply_format,
        batch.len(),
        start.elapsed().as_millis()
    );

    Ok(Json(batch))
}
