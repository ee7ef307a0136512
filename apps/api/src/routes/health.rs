use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status and the model agents are configured to use.
/// Does not contact the model backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "agent-suite-api",
        "model": state.llm.model(),
        "backend": state.config.ollama_host
    }))
}
