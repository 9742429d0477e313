//! Endpoint-level tests driven through `warp::test`, with a canned
//! completion backend where a reply is needed and a deliberately
//! unconfigured real client for the failure paths.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use comfy_gpt::handlers::AppState;
use comfy_gpt::llm::{
    AssistantReply, ChatMessage, CompletionBackend, CompletionClient, CompletionError, LlmConfig,
};
use comfy_gpt::routes::configure_routes;

struct CannedBackend(&'static str);

#[async_trait]
impl CompletionBackend for CannedBackend {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _model: Option<&str>,
    ) -> Result<AssistantReply, CompletionError> {
        Ok(AssistantReply {
            role: "assistant".to_string(),
            content: self.0.to_string(),
        })
    }
}

fn canned_routes(
    reply: &'static str,
) -> impl warp::Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
    let state = Arc::new(
        AppState::new(Arc::new(CannedBackend(reply))).with_chunk_delay(Duration::ZERO),
    );
    configure_routes(state)
}

/// Routes backed by a real client with no configured endpoint: every
/// completion call fails with a transport error before touching the network.
fn unconfigured_routes(
) -> impl warp::Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
    let client = CompletionClient::new(LlmConfig::default()).expect("client builds");
    let state = Arc::new(AppState::new(Arc::new(client)).with_chunk_delay(Duration::ZERO));
    configure_routes(state)
}

fn parse_ndjson(body: &[u8]) -> Vec<Value> {
    std::str::from_utf8(body)
        .expect("body is UTF-8")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("each line is a JSON document"))
        .collect()
}

#[tokio::test]
async fn test_fetch_messages_unknown_session_is_empty_array() {
    let routes = canned_routes("ok");
    let res = warp::test::request()
        .method("GET")
        .path("/workspace/fetch_messages_by_id?session_id=does-not-exist")
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_invoke_round_trip_and_history_growth() {
    let routes = canned_routes("canned reply");

    let res = warp::test::request()
        .method("POST")
        .path("/api/chat/invoke")
        .json(&json!({"session_id": "s1", "prompt": "first question"}))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(body["session_id"], "s1");
    assert_eq!(body["message"]["content"], "canned reply");

    let res = warp::test::request()
        .method("POST")
        .path("/api/chat/invoke")
        .json(&json!({"session_id": "s1", "prompt": "second question"}))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 200);

    let res = warp::test::request()
        .method("GET")
        .path("/workspace/fetch_messages_by_id?session_id=s1")
        .reply(&routes)
        .await;
    let history: Vec<Value> = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[0]["content"], "first question");
    assert_eq!(history[1]["role"], "assistant");
    assert_eq!(history[2]["content"], "second question");
}

#[tokio::test]
async fn test_invoke_without_session_id_creates_one() {
    let routes = canned_routes("fresh session reply");
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat/invoke")
        .json(&json!({"prompt": "no session yet"}))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    let session_id = body["session_id"].as_str().unwrap();
    assert!(!session_id.is_empty());

    // the generated session holds both turns
    let res = warp::test::request()
        .method("GET")
        .path(&format!(
            "/workspace/fetch_messages_by_id?session_id={session_id}"
        ))
        .reply(&routes)
        .await;
    let history: Vec<Value> = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["content"], "no session yet");
}

#[tokio::test]
async fn test_chat_without_session_id_creates_one() {
    let routes = canned_routes("hello");
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .json(&json!({"history": [{"role": "user", "content": "hi"}]}))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    let session_id = body["session_id"].as_str().unwrap();
    assert!(!session_id.is_empty());
    assert_eq!(body["message"]["content"], "hello");
}

#[tokio::test]
async fn test_chat_upstream_failure_returns_500_and_keeps_user_turn() {
    let routes = unconfigured_routes();
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat")
        .json(&json!({
            "session_id": "sess-err-1",
            "history": [{"role": "user", "content": "hello?"}],
        }))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 500);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!(body["error"].as_str().is_some());

    // the user turn survived the failed completion
    let res = warp::test::request()
        .method("GET")
        .path("/workspace/fetch_messages_by_id?session_id=sess-err-1")
        .reply(&routes)
        .await;
    let history: Vec<Value> = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[0]["content"], "hello?");
}

#[tokio::test]
async fn test_explain_node_round_trip() {
    let routes = canned_routes("KSampler runs the sampling loop.");
    let res = warp::test::request()
        .method("POST")
        .path("/api/explain_node")
        .json(&json!({"node_type": "KSampler"}))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 200);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!(body["session_id"].as_str().is_some());
    assert_eq!(body["message"]["content"], "KSampler runs the sampling loop.");
}

#[tokio::test]
async fn test_explain_node_upstream_failure_is_500() {
    let routes = unconfigured_routes();
    let res = warp::test::request()
        .method("POST")
        .path("/api/explain_node")
        .json(&json!({"node_type": "KSampler"}))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 500);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_workflow_gen_streams_workflow_option_frames() {
    let routes = canned_routes("Here you go.");
    let res = warp::test::request()
        .method("POST")
        .path("/workspace/workflow_gen")
        .json(&json!({"message": "tell me about this workflow"}))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(
        res.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let frames = parse_ndjson(res.body());
    assert!(frames.len() >= 2);

    let first = &frames[0];
    assert_eq!(first["type"], "workflow_option");
    assert_eq!(first["finished"], false);
    assert_eq!(first["text"], "");
    assert_eq!(first["ext"][0]["type"], "workflows");

    // exactly one finished frame, and it is the last one
    let finished: Vec<usize> = frames
        .iter()
        .enumerate()
        .filter(|(_, f)| f["finished"] == true)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(finished, vec![frames.len() - 1]);
    assert_eq!(frames.last().unwrap()["text"], "Here you go.");

    // monotonic prefix across the whole exchange
    for pair in frames.windows(2) {
        let prev = pair[0]["text"].as_str().unwrap();
        let next = pair[1]["text"].as_str().unwrap();
        assert!(next.starts_with(prev));
    }
}

#[tokio::test]
async fn test_workflow_gen_routes_node_recommendations() {
    let routes = canned_routes("Try these nodes.");
    let res = warp::test::request()
        .method("POST")
        .path("/workspace/workflow_gen")
        .json(&json!({"message": "can you recommend nodes"}))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 200);

    let frames = parse_ndjson(res.body());
    let first = &frames[0];
    assert_eq!(first["type"], "downstream_node_recommend");
    assert_eq!(first["ext"][0]["type"], "node_info");
    assert!(first["ext"][0]["data"]["existing_nodes"].is_array());
    assert!(first["ext"][0]["data"]["missing_nodes"].is_array());
}

#[tokio::test]
async fn test_workflow_gen_upstream_failure_degrades_to_text() {
    let routes = unconfigured_routes();
    let res = warp::test::request()
        .method("POST")
        .path("/workspace/workflow_gen")
        .json(&json!({"message": "hello there"}))
        .reply(&routes)
        .await;
    // still a 200 stream, error rendered as assistant text
    assert_eq!(res.status(), 200);
    let frames = parse_ndjson(res.body());
    let last = frames.last().unwrap();
    assert_eq!(last["finished"], true);
    assert!(last["text"].as_str().unwrap().starts_with("Sorry,"));
}

#[tokio::test]
async fn test_models_list_is_stable_across_calls() {
    let routes = canned_routes("ok");
    let first = warp::test::request()
        .method("GET")
        .path("/api/gpt/models")
        .reply(&routes)
        .await;
    let second = warp::test::request()
        .method("GET")
        .path("/api/gpt/models")
        .reply(&routes)
        .await;
    assert_eq!(first.status(), 200);
    assert_eq!(first.body(), second.body());
    let body: Value = serde_json::from_slice(first.body()).unwrap();
    assert!(!body["models"].as_array().unwrap().is_empty());
    assert!(body["models"][0]["id"].as_str().is_some());
}

#[tokio::test]
async fn test_missing_required_field_is_400() {
    let routes = canned_routes("ok");
    let res = warp::test::request()
        .method("POST")
        .path("/api/chat/invoke")
        .json(&json!({"session_id": "s1"}))
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_unknown_route_is_404_json() {
    let routes = canned_routes("ok");
    let res = warp::test::request()
        .method("GET")
        .path("/nope")
        .reply(&routes)
        .await;
    assert_eq!(res.status(), 404);
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    assert!(body["error"].as_str().is_some());
}
