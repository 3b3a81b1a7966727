//! # REST API for accounts
//!
//! Register, log in and log out. Register and login answer with a session
//! token for the `Authorization: Bearer` header.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use tracing::info;

use crate::io::rest::mappers::AccountMapper;
use crate::io::rest::{ApiError, AuthSession};
use crate::AppState;
use shared::{LoginRequest, RegisterRequest};

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/auth/register");

    let session = state
        .account_service
        .register(AccountMapper::register_command(request))
        .await?;

    Ok((StatusCode::CREATED, Json(AccountMapper::to_session_response(session))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/auth/login");

    let session = state
        .account_service
        .login(AccountMapper::login_command(request))
        .await?;

    Ok(Json(AccountMapper::to_session_response(session)))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/auth/logout - user {}", session.user_id);

    state.account_service.logout(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
