//! Conversions between domain models and the shared DTOs.

pub mod account_mapper;
pub mod dashboard_mapper;
pub mod entry_mapper;
pub mod summary_mapper;

pub use account_mapper::AccountMapper;
pub use dashboard_mapper::DashboardMapper;
pub use entry_mapper::EntryMapper;
pub use summary_mapper::SummaryMapper;
