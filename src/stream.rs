//! Streaming responder
//!
//! Drives one long-lived HTTP response as a sequence of newline-delimited
//! JSON frames. The frame sequence is produced lazily by an async generator;
//! the transport layer consumes and flushes each value, so pacing policy
//! stays separate from frame content.
//!
//! Protocol: an initial metadata frame (empty text, intent type and ext
//! payloads), then frames whose text is a strictly growing prefix of the
//! final reply, then exactly one terminal frame with `finished = true`
//! carrying the complete text. An upstream failure never aborts the
//! transport: headers and the metadata frame are already committed, so the
//! error degrades to apology text delivered through the same protocol.

use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use hyper::Body;
use tracing::warn;
use warp::http::header::{HeaderName, HeaderValue, CONTENT_TYPE};

use crate::intent::RoutedIntent;
use crate::llm::{ChatMessage, CompletionBackend};
use crate::models::{ChatFrame, Role};
use crate::store::SessionStore;

/// Frame sequence for one streamed chat exchange.
///
/// A successful reply is appended to the session before any text frame is
/// emitted; a failed completion streams an apology instead and persists
/// nothing beyond the already-stored user turn.
pub fn chat_frames(
    store: SessionStore,
    backend: Arc<dyn CompletionBackend>,
    session_id: String,
    prompt: Vec<ChatMessage>,
    intent: RoutedIntent,
    chunk_delay: Duration,
) -> impl Stream<Item = ChatFrame> + Send + 'static {
    stream! {
        let mut frame = ChatFrame {
            session_id: session_id.clone(),
            text: String::new(),
            finished: false,
            response_type: intent.response_type,
            format: "text".to_string(),
            ext: Some(intent.ext),
        };
        yield frame.clone();

        let reply = match backend.complete(&prompt, None).await {
            Ok(reply) => {
                store
                    .append(&session_id, Role::Assistant, reply.content.clone())
                    .await;
                reply.content
            }
            Err(err) => {
                warn!(%err, session_id = %session_id, "completion failed mid-stream, degrading to text");
                format!("Sorry, something went wrong while handling your request: {err}")
            }
        };

        for ch in reply.chars() {
            frame.text.push(ch);
            yield frame.clone();
            if !chunk_delay.is_zero() {
                tokio::time::sleep(chunk_delay).await;
            }
        }

        frame.finished = true;
        frame.text = reply;
        yield frame;
    }
}

/// Wrap a frame stream into a 200 response with a chunked NDJSON body.
///
/// If the caller closes the connection early the body stream is simply
/// dropped; no further frames are produced and nothing faults.
pub fn ndjson_reply(
    frames: impl Stream<Item = ChatFrame> + Send + 'static,
) -> warp::reply::Response {
    let body = Body::wrap_stream(frames.map(|frame| {
        serde_json::to_vec(&frame).map(|mut line| {
            line.push(b'\n');
            Bytes::from(line)
        })
    }));
    let mut response = warp::reply::Response::new(body);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response.headers_mut().insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    response
}
