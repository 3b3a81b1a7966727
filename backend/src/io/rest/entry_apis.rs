//! # REST API for expenses and funds
//!
//! Lists cover the current month, newest first. New entries are dated today.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use tracing::info;

use crate::io::rest::mappers::EntryMapper;
use crate::io::rest::{ApiError, AuthSession};
use crate::AppState;
use shared::{AddExpenseRequest, AddFundRequest, Expense, FlashMessage, Fund};

pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    info!("GET /api/expenses - user {}", session.user_id);

    let expenses = state.entry_service.current_month_expenses(session.user_id).await?;
    Ok(Json(expenses.into_iter().map(EntryMapper::expense_to_dto).collect()))
}

pub async fn add_expense(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(request): Json<AddExpenseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/expenses - user {}", session.user_id);

    let result = state
        .entry_service
        .add_expense(EntryMapper::add_expense_command(session.user_id, request))
        .await?;

    Ok((StatusCode::CREATED, Json(FlashMessage::success(result.success_message))))
}

pub async fn list_funds(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<Vec<Fund>>, ApiError> {
    info!("GET /api/funds - user {}", session.user_id);

    let funds = state.entry_service.current_month_funds(session.user_id).await?;
    Ok(Json(funds.into_iter().map(EntryMapper::fund_to_dto).collect()))
}

pub async fn add_fund(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Json(request): Json<AddFundRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/funds - user {}", session.user_id);

    let result = state
        .entry_service
        .add_fund(EntryMapper::add_fund_command(session.user_id, request))
        .await?;

    Ok((StatusCode::CREATED, Json(FlashMessage::success(result.success_message))))
}
