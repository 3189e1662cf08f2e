// HTTP surface: POST /api/agent hands one user message to the chat agent.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::agent::ChatAgent;

#[derive(Clone)]
struct AppState {
    agent: Arc<dyn ChatAgent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    #[serde(default)]
    pub user_message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AgentResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Build the chat router around `agent`.
pub fn router(agent: Arc<dyn ChatAgent>) -> Router {
    Router::new()
        .route("/api/agent", post(agent_handler))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { agent })
}

async fn agent_handler(
    State(state): State<AppState>,
    payload: Result<Json<AgentRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected agent request body");
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    let message = match request.user_message {
        Some(message) if !message.trim().is_empty() => message,
        _ => return error_response(StatusCode::BAD_REQUEST, "No message provided"),
    };

    match state.agent.respond(&message).await {
        Ok(text) => Json(AgentResponse { response: text }).into_response(),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Error processing request");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, client_error_message(&err))
        }
    }
}

/// Map an agent failure to the message shown to the client.
pub fn client_error_message(err: &anyhow::Error) -> &'static str {
    let detail = format!("{err:#}");
    if detail.contains("private key") {
        "Invalid private key configuration. Please check your environment variables."
    } else if detail.contains("network") {
        "Network configuration error. Please check your NETWORK_ID environment variable."
    } else {
        "Failed to process message. Please try again later."
    }
}
