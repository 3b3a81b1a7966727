//! # Domain Layer
//!
//! Business rules of the expense tracker: recording expenses and fund
//! deposits, monthly aggregation, archival of old rows, and accounts.
//!
//! Services are cheap to clone and hold their repositories directly. Anything
//! date-dependent reads "today" from an injected [`Clock`].
//!
//! ## Services
//!
//! - [`SummaryService`]: per-month totals, previous-month savings, daily spendable
//! - [`ArchivalService`] and [`ArchivalScheduler`]: snapshot-then-delete of rows
//!   older than the retention window, on a fixed period
//! - [`EntryService`]: validated expense and fund recording
//! - [`AccountService`]: registration, login and sessions
//! - [`DashboardService`]: the composed dashboard view and chart series

pub mod account_service;
pub mod archival;
pub mod clock;
pub mod commands;
pub mod dashboard_service;
pub mod entry_service;
pub mod error;
pub mod models;
pub mod period;
pub mod scheduler;
pub mod summary_service;

pub use account_service::AccountService;
pub use archival::{ArchivalService, ArchiveReport, ArchiveScope};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard_service::DashboardService;
pub use entry_service::EntryService;
pub use error::{TrackerError, TrackerResult, ValidationError};
pub use period::MonthPeriod;
pub use scheduler::ArchivalScheduler;
pub use summary_service::SummaryService;
