// End-to-end tests for POST /api/agent against the real registry and agent.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chat_actions_core::{ActionRegistry, Dispatcher};
use chat_actions_search::SearchActionProvider;
use chat_server::routes::{AgentResponse, ErrorResponse};
use chat_server::{router, ChatAgent, CommandAgent};
use serde_json::{json, Value};
use tower::ServiceExt;

fn search_app() -> Router {
    let registry = ActionRegistry::new();
    registry.register_provider(SearchActionProvider::new());
    router(Arc::new(CommandAgent::new(Dispatcher::new(registry))))
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    post_raw(app, body.to_string()).await
}

async fn post_raw(app: Router, body: String) -> (StatusCode, Value) {
    let (status, bytes) = post_bytes(app, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_bytes(app: Router, body: String) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/agent")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// Agent that always fails with the given message.
struct FailingAgent(&'static str);

#[async_trait]
impl ChatAgent for FailingAgent {
    async fn respond(&self, _message: &str) -> anyhow::Result<String> {
        Err(anyhow!(self.0))
    }
}

#[tokio::test]
async fn test_search_command_returns_results() {
    let body = json!({ "userMessage": r#"/search {"query": "btc price", "filters": {}}"# });
    let (status, bytes) = post_bytes(search_app(), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let reply: AgentResponse = serde_json::from_slice(&bytes).unwrap();
    let response: Value = serde_json::from_str(&reply.response).unwrap();
    assert_eq!(response, json!({ "results": [] }));
}

#[tokio::test]
async fn test_actions_command_lists_catalog() {
    let (status, body) = post_json(search_app(), json!({ "userMessage": "/actions" })).await;

    assert_eq!(status, StatusCode::OK);
    let text = body["response"].as_str().unwrap();
    assert!(text.contains("search (search): Perform a search query"));
}

#[tokio::test]
async fn test_actions_command_ignores_trailing_parameters() {
    let (status, body) = post_json(search_app(), json!({ "userMessage": "/actions {}" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("Available actions:"));
}

#[tokio::test]
async fn test_plain_message_gets_usage() {
    let (status, body) = post_json(search_app(), json!({ "userMessage": "hello there" })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["response"].as_str().unwrap().contains("Available: search"));
}

#[tokio::test]
async fn test_missing_message_is_bad_request() {
    let (status, body) = post_json(search_app(), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No message provided" }));

    let (status, body) = post_json(search_app(), json!({ "userMessage": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No message provided");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (status, body) = post_raw(search_app(), "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_unknown_action_is_server_error() {
    let body = json!({ "userMessage": "/bridge {}" });
    let (status, bytes) = post_bytes(search_app(), body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let reply: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        reply.error,
        "Failed to process message. Please try again later."
    );
}

#[tokio::test]
async fn test_agent_errors_are_classified() {
    let app = router(Arc::new(FailingAgent("missing private key")));
    let (status, body) = post_json(app, json!({ "userMessage": "hi" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Invalid private key configuration. Please check your environment variables."
    );

    let app = router(Arc::new(FailingAgent("unknown network id")));
    let (_, body) = post_json(app, json!({ "userMessage": "hi" })).await;
    assert_eq!(
        body["error"],
        "Network configuration error. Please check your NETWORK_ID environment variable."
    );
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = search_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
