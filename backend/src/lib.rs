//! # Expense Tracker Backend
//!
//! Monthly aggregation and archival core of a personal expense tracker,
//! served as a JSON API.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers, DTO mappers)
//!     ↓
//! Domain Layer (aggregation, archival, entries, accounts)
//!     ↓
//! Storage Layer (SQLite via sqlx)
//! ```
//!
//! The composition root builds the services once and shares them through
//! [`AppState`]. The archival scheduler is started and stopped by the binary.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    AccountService, ArchivalService, Clock, DashboardService, EntryService, SummaryService,
};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub entry_service: EntryService,
    pub summary_service: SummaryService,
    pub dashboard_service: DashboardService,
    pub archival_service: ArchivalService,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(db: DbConnection, config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            account_service: AccountService::new(db.clone()),
            entry_service: EntryService::new(db.clone(), clock.clone()),
            summary_service: SummaryService::new(db.clone(), clock.clone()),
            dashboard_service: DashboardService::new(db.clone(), clock.clone()),
            archival_service: ArchivalService::new(db, config.archive_scope),
            clock,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db, config, clock))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin {cors_origin:?}"))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let public_routes = Router::new()
        .route("/auth/register", post(io::register))
        .route("/auth/login", post(io::login));

    let protected_routes = Router::new()
        .route("/auth/logout", post(io::logout))
        .route("/dashboard", get(io::get_dashboard))
        .route("/summary", get(io::current_month_summary))
        .route("/summary/previous-savings", get(io::previous_month_savings))
        .route("/summary/:year/:month", get(io::monthly_summary))
        .route("/expenses", get(io::list_expenses).post(io::add_expense))
        .route("/funds", get(io::list_funds).post(io::add_fund))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), io::require_session));

    Ok(Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
