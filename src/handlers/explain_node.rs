// POST /api/explain_node handler

use std::convert::Infallible;
use std::sync::Arc;

use tracing::info;

use super::{complete_and_reply, AppState};
use crate::models::{ExplainNodeRequest, Role};
use crate::prompt::{build_prompt, node_preamble};

/// Ask the assistant to explain one node type. The question is synthesized
/// into a user turn so it shows up in the session history like any other.
pub async fn explain_node_handler(
    state: Arc<AppState>,
    request: ExplainNodeRequest,
) -> Result<impl warp::Reply, Infallible> {
    let session_id = state.store.resolve(request.session_id).await;
    info!(session_id = %session_id, node_type = %request.node_type, "POST /api/explain_node");

    let question = format!(
        "Explain the {} node: what it does, its parameters, and when to use it.",
        request.node_type
    );
    state.store.append(&session_id, Role::User, question).await;
    let history = state.store.history(&session_id).await.unwrap_or_default();
    let prompt = build_prompt(&history, &node_preamble(&request.node_type));

    Ok(complete_and_reply(&state, session_id, &prompt, None).await)
}
