// GET /workspace/fetch_messages_by_id handler

use std::convert::Infallible;
use std::sync::Arc;

use tracing::info;

use super::AppState;
use crate::models::FetchMessagesQuery;

/// Return a session's history as a JSON array. An unknown or absent id is
/// tolerated and yields an empty array, never an error.
pub async fn fetch_messages_handler(
    state: Arc<AppState>,
    query: FetchMessagesQuery,
) -> Result<impl warp::Reply, Infallible> {
    info!(session_id = ?query.session_id, "GET /workspace/fetch_messages_by_id");
    let messages = match query.session_id {
        Some(id) => state.store.history(&id).await.unwrap_or_default(),
        None => Vec::new(),
    };
    Ok(warp::reply::json(&messages))
}
