//! Axum route handlers for sign-up, login and logout.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::errors::AppError;
use crate::models::user::UserAccount;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub username: String,
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<(StatusCode, Json<UserAccount>), AppError> {
    let account = state.accounts.signup(&req.username, &req.password).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state.accounts.login(&req.username, &req.password).await?;
    Ok(Json(LoginResponse {
        token,
        username: req.username.trim().to_string(),
    }))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(State(state): State<AppState>, session: AuthSession) -> StatusCode {
    state.accounts.logout(session.token).await;
    StatusCode::NO_CONTENT
}
