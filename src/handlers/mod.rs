// Handlers module

pub mod chat;
pub mod explain_node;
pub mod fetch_messages;
pub mod invoke;
pub mod models;
pub mod workflow_gen;

pub use chat::chat_handler;
pub use explain_node::explain_node_handler;
pub use fetch_messages::fetch_messages_handler;
pub use invoke::invoke_handler;
pub use models::models_handler;
pub use workflow_gen::workflow_gen_handler;

use std::sync::Arc;
use std::time::Duration;

use tracing::error;
use warp::http::StatusCode;
use warp::Reply;

use crate::intent::IntentRouter;
use crate::llm::{ChatMessage, CompletionBackend};
use crate::models::{ChatReply, ErrorBody, Role};
use crate::store::SessionStore;

/// Process-wide dependencies, constructed once at startup and injected into
/// every handler.
pub struct AppState {
    pub store: SessionStore,
    pub backend: Arc<dyn CompletionBackend>,
    pub intents: IntentRouter,
    /// Pause between streamed frames; presentation only
    pub chunk_delay: Duration,
}

impl AppState {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            store: SessionStore::new(),
            backend,
            intents: IntentRouter::default(),
            chunk_delay: Duration::from_millis(10),
        }
    }

    pub fn with_chunk_delay(mut self, chunk_delay: Duration) -> Self {
        self.chunk_delay = chunk_delay;
        self
    }
}

/// JSON `{"error": …}` body with the given status
pub(crate) fn error_reply(
    status: StatusCode,
    message: impl Into<String>,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: message.into(),
        }),
        status,
    )
}

/// Shared tail of the non-streaming handlers: call the completion endpoint,
/// persist a non-empty reply, and render `{session_id, message}` or a 500
/// error body. The user turn persisted earlier is never rolled back.
pub(crate) async fn complete_and_reply(
    state: &AppState,
    session_id: String,
    prompt: &[ChatMessage],
    model: Option<&str>,
) -> warp::reply::Response {
    match state.backend.complete(prompt, model).await {
        Ok(reply) => {
            if !reply.content.is_empty() {
                state
                    .store
                    .append(&session_id, Role::Assistant, reply.content.clone())
                    .await;
            }
            warp::reply::json(&ChatReply {
                session_id,
                message: reply,
            })
            .into_response()
        }
        Err(err) => {
            error!(%err, session_id = %session_id, "completion call failed");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
