//! # Storage Module
//!
//! SQLite persistence for users, sessions, expenses, funds and monthly
//! summaries. Repositories are thin wrappers over `sqlx` queries; all
//! coordination (uniqueness of a period's summary, atomic archival) is
//! delegated to the database's constraints and transactions.
//!
//! Amounts are stored as integer cents and converted to `Decimal` at the
//! repository boundary.

pub mod connection;
pub mod repositories;

#[cfg(test)]
pub mod test_utils;

pub use connection::DbConnection;
pub use repositories::{
    ExpenseRepository, FundRepository, MonthlySavingsRepository, SessionRepository, SummaryInsert, UserInsert,
    UserRepository,
};
