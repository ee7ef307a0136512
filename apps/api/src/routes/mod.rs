pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::agents::handlers as agents;
use crate::auth::handlers as auth;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/signup", post(auth::handle_signup))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        // Agents
        .route("/api/v1/agents/resume", post(agents::handle_resume))
        .route("/api/v1/agents/news", post(agents::handle_news))
        .route("/api/v1/agents/code", post(agents::handle_code))
        .route("/api/v1/agents/document-qa", post(agents::handle_document_qa))
        .route("/api/v1/agents/email", post(agents::handle_email))
        .route("/api/v1/agents/meeting", post(agents::handle_meeting))
        .with_state(state)
}
