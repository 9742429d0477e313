// POST /api/chat/invoke handler

use std::convert::Infallible;
use std::sync::Arc;

use tracing::info;

use super::{complete_and_reply, AppState};
use crate::models::{InvokeRequest, Role};
use crate::prompt::{build_prompt, GENERAL_PREAMBLE};

/// Single-turn invocation against the stored session history.
pub async fn invoke_handler(
    state: Arc<AppState>,
    request: InvokeRequest,
) -> Result<impl warp::Reply, Infallible> {
    let session_id = state.store.resolve(request.session_id).await;
    info!(session_id = %session_id, "POST /api/chat/invoke");

    state
        .store
        .append(&session_id, Role::User, request.prompt)
        .await;
    let history = state.store.history(&session_id).await.unwrap_or_default();
    let prompt = build_prompt(&history, GENERAL_PREAMBLE);

    Ok(complete_and_reply(&state, session_id, &prompt, None).await)
}
