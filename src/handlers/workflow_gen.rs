// POST /workspace/workflow_gen handler

use std::convert::Infallible;
use std::sync::Arc;

use tracing::info;

use super::AppState;
use crate::models::{Role, WorkflowGenRequest};
use crate::prompt::{build_prompt, WORKFLOW_PREAMBLE};
use crate::stream::{chat_frames, ndjson_reply};

/// Streaming workflow chat. The inbound message picks a response type via
/// the intent router; the reply is then streamed as NDJSON frames.
pub async fn workflow_gen_handler(
    state: Arc<AppState>,
    request: WorkflowGenRequest,
) -> Result<impl warp::Reply, Infallible> {
    let session_id = state.store.resolve(request.session_id).await;
    info!(session_id = %session_id, "POST /workspace/workflow_gen");

    state
        .store
        .append(&session_id, Role::User, request.message.clone())
        .await;
    let history = state.store.history(&session_id).await.unwrap_or_default();
    let prompt = build_prompt(&history, WORKFLOW_PREAMBLE);
    let intent = state.intents.route(&request.message);

    let frames = chat_frames(
        state.store.clone(),
        state.backend.clone(),
        session_id,
        prompt,
        intent,
        state.chunk_delay,
    );
    Ok(ndjson_reply(frames))
}
