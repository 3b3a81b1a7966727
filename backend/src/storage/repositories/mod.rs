pub mod expense_repository;
pub mod fund_repository;
pub mod ledger_queries;
pub mod monthly_savings_repository;
pub mod session_repository;
pub mod user_repository;

pub use expense_repository::ExpenseRepository;
pub use fund_repository::FundRepository;
pub use monthly_savings_repository::{MonthlySavingsRepository, SummaryInsert};
pub use session_repository::SessionRepository;
pub use user_repository::{UserInsert, UserRepository};
