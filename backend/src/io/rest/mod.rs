//! # REST API Interface Layer
//!
//! JSON endpoints over the domain services. Every handler logs its route,
//! maps shared DTOs to domain commands and back, and reports failures as a
//! [`FlashMessage`] with a matching status code:
//!
//! | error | status |
//! | --- | --- |
//! | validation | 400 |
//! | invalid credentials, missing or unknown session | 401 |
//! | email already registered | 409 |
//! | persistence | 500 (details only in the log) |

pub mod account_apis;
pub mod dashboard_apis;
pub mod entry_apis;
pub mod mappers;
pub mod summary_apis;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use shared::FlashMessage;
use tracing::{error, warn};

use crate::domain::TrackerError;
use crate::AppState;

pub use account_apis::*;
pub use dashboard_apis::*;
pub use entry_apis::*;
pub use summary_apis::*;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// The signed-in user of a request, inserted by [`require_session`]
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: i64,
    pub token: String,
}

/// Error type returned by handlers
#[derive(Debug)]
pub struct ApiError(pub TrackerError);

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        ApiError(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError(TrackerError::Persistence(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TrackerError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            TrackerError::EmailTaken => (StatusCode::CONFLICT, self.0.to_string()),
            TrackerError::InvalidCredentials | TrackerError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, self.0.to_string())
            }
            TrackerError::Persistence(e) => {
                error!("Request failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };
        (status, Json(FlashMessage::error(message))).into_response()
    }
}

/// Resolve `Authorization: Bearer <token>` to a session or answer 401
pub async fn require_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let token = match bearer_token(request.headers()) {
        Some(token) => token.to_string(),
        None => {
            warn!("Rejected {} {}: no bearer token", request.method(), request.uri().path());
            return ApiError(TrackerError::Unauthorized).into_response();
        }
    };

    match state.account_service.authenticate(&token).await {
        Ok(user_id) => {
            request.extensions_mut().insert(AuthSession { user_id, token });
            next.run(request).await
        }
        Err(e) => {
            warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
            ApiError(e).into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
