//! # REST API for monthly summaries

use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use tracing::info;

use crate::domain::{MonthPeriod, ValidationError};
use crate::io::rest::mappers::SummaryMapper;
use crate::io::rest::{ApiError, AuthSession};
use crate::AppState;
use shared::{MonthlySummary, PreviousMonthSavingsResponse};

pub async fn current_month_summary(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<MonthlySummary>, ApiError> {
    info!("GET /api/summary - user {}", session.user_id);

    let summary = state.summary_service.current_month_summary(session.user_id).await?;
    Ok(Json(SummaryMapper::to_dto(summary)))
}

/// Any month, including archived ones that only exist as a stored summary
pub async fn monthly_summary(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthlySummary>, ApiError> {
    info!("GET /api/summary/{}/{} - user {}", year, month, session.user_id);

    let period = MonthPeriod::new(year, month)
        .ok_or_else(|| ValidationError::InvalidPeriod(format!("{year}-{month:02}")))
        .map_err(|e| ApiError(e.into()))?;

    let summary = state.summary_service.monthly_summary(session.user_id, period).await?;
    Ok(Json(SummaryMapper::to_dto(summary)))
}

pub async fn previous_month_savings(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<PreviousMonthSavingsResponse>, ApiError> {
    info!("GET /api/summary/previous-savings - user {}", session.user_id);

    let summary = state.summary_service.previous_month_savings(session.user_id).await?;
    Ok(Json(SummaryMapper::to_previous_savings(summary)))
}
