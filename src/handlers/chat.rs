// POST /api/chat handler

use std::convert::Infallible;
use std::sync::Arc;

use tracing::info;

use super::{complete_and_reply, AppState};
use crate::llm::ChatMessage;
use crate::models::{ChatRequest, Role};
use crate::prompt::GENERAL_PREAMBLE;

/// Simple request/response chat over a caller-supplied history.
///
/// The prompt is assembled from the request body rather than the store, but
/// the newest user turn is persisted first so it survives a failed
/// completion.
pub async fn chat_handler(
    state: Arc<AppState>,
    request: ChatRequest,
) -> Result<impl warp::Reply, Infallible> {
    let session_id = state.store.resolve(request.session_id).await;
    info!(session_id = %session_id, turns = request.history.len(), "POST /api/chat");

    if let Some(turn) = request
        .history
        .iter()
        .rev()
        .find(|m| m.role == Role::User.as_str())
    {
        state
            .store
            .append(&session_id, Role::User, turn.content.clone())
            .await;
    }

    let mut prompt = vec![ChatMessage::system(GENERAL_PREAMBLE)];
    prompt.extend(request.history.iter().filter_map(|entry| {
        Role::parse(&entry.role)
            .filter(|role| *role != Role::System)
            .map(|role| ChatMessage {
                role,
                content: entry.content.clone(),
            })
    }));

    Ok(complete_and_reply(&state, session_id, &prompt, request.model.as_deref()).await)
}
