// Route definitions and rejection recovery

use std::convert::Infallible;
use std::sync::Arc;

use tracing::error;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::handlers::{self, AppState};
use crate::models::FetchMessagesQuery;

pub fn configure_routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    // GET /workspace/fetch_messages_by_id?session_id=<id>
    let fetch_messages = warp::path!("workspace" / "fetch_messages_by_id")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(warp::query::<FetchMessagesQuery>())
        .and_then(handlers::fetch_messages_handler);

    // POST /api/chat
    let chat = warp::path!("api" / "chat")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handlers::chat_handler);

    // POST /workspace/workflow_gen (streaming)
    let workflow_gen = warp::path!("workspace" / "workflow_gen")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handlers::workflow_gen_handler);

    // POST /api/explain_node
    let explain_node = warp::path!("api" / "explain_node")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handlers::explain_node_handler);

    // POST /api/chat/invoke
    let invoke = warp::path!("api" / "chat" / "invoke")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(handlers::invoke_handler);

    // GET /api/gpt/models
    let models = warp::path!("api" / "gpt" / "models")
        .and(warp::get())
        .and_then(handlers::models_handler);

    fetch_messages
        .or(invoke)
        .or(chat)
        .or(workflow_gen)
        .or(explain_node)
        .or(models)
        .recover(handle_rejection)
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Render every rejection as a JSON `{"error": …}` body so no request can
/// crash the host process or leak a bare rejection.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed".to_string(),
        )
    } else {
        error!(?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal error".to_string(),
        )
    };
    Ok(handlers::error_reply(status, message))
}
