use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use marga_rs::{Engine, EngineError, TurnRequest};
use serde_json::json;

/// Build the HTTP router exposing the turn endpoint.
pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/healthz", get(healthz))
        .with_state(engine)
}

async fn chat(State(engine): State<Arc<Engine>>, Json(req): Json<TurnRequest>) -> Response {
    match engine.process(req).await {
        Ok(resp) => Json(resp).into_response(),
        Err(EngineError::InvalidInput) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing message or sessionId" })),
        )
            .into_response(),
    }
}

async fn healthz() -> &'static str {
    "ok"
}
