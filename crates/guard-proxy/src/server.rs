use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use guard_protocol::{ChatRequest, ChatResponse};
use serde_json::{json, Value};

use crate::error::ChatError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/chat", post(chat))
        .with_state(state)
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let Json(request) = payload.map_err(|err| ChatError::InvalidInput(err.body_text()))?;
    let response = state.pipeline.run(&request.messages).await?;
    Ok(Json(response))
}

/// Configuration snapshot; informational only.
async fn healthz(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.config.model,
        "backend_url": state.config.backend_url,
        "guard_enabled": state.config.guard_enabled,
        "guard_detailed": state.config.guard_detailed,
        "listen_addr": state.config.listen_addr.to_string(),
    }))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(include_str!("../static/index.html").replace("{{ model }}", &state.config.model))
}
