pub mod entry;
pub mod money;
pub mod monthly_savings;
pub mod user;

pub use entry::{Expense, Fund, LedgerTable, NewExpense, NewFund};
pub use monthly_savings::{MonthlySavings, PeriodTotals, TotalsSource};
pub use user::{NewUser, User};
