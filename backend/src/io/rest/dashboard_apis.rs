use axum::{extract::State, response::Json, Extension};
use tracing::info;

use crate::io::rest::mappers::DashboardMapper;
use crate::io::rest::{ApiError, AuthSession};
use crate::AppState;
use shared::DashboardResponse;

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
) -> Result<Json<DashboardResponse>, ApiError> {
    info!("GET /api/dashboard - user {}", session.user_id);

    let dashboard = state.dashboard_service.dashboard(session.user_id).await?;
    Ok(Json(DashboardMapper::to_dto(dashboard)))
}
