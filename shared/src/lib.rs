use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded expense as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    /// Day the expense was recorded (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Free-form label (max 50 characters)
    pub category: String,
    /// Positive amount with two fractional digits
    pub amount: Decimal,
    pub description: Option<String>,
}

/// A recorded fund deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Public view of a registered user (never carries the password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by register and login. `token` goes in `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Form-style input for a new expense. Amount arrives as text and is
/// validated server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpenseRequest {
    pub category: Option<String>,
    pub amount: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFundRequest {
    pub amount: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

/// One-shot user-facing message, the JSON counterpart of a flashed banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Full month name, e.g. "March"
    pub month: String,
    pub year: i32,
    pub total_expenses: Decimal,
    pub total_funds: Decimal,
    /// total_funds - total_expenses, may be negative
    pub savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousMonthSavingsResponse {
    pub month: String,
    pub year: i32,
    pub savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpensePoint {
    /// Abbreviated month name, e.g. "Jan"
    pub month: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopExpense {
    pub label: String,
    pub category: String,
    pub amount: Decimal,
}

/// Data series behind the dashboard charts. Rendering is left to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardCharts {
    pub expenses_by_category: Vec<CategoryTotal>,
    pub monthly_expenses: Vec<MonthlyExpensePoint>,
    pub balance_trend: Vec<BalancePoint>,
    pub top_expenses: Vec<TopExpense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub user: UserProfile,
    pub expenses: Vec<Expense>,
    pub funds: Vec<Fund>,
    pub total_expenses: Decimal,
    pub total_funds: Decimal,
    pub remaining_balance: Decimal,
    pub remaining_days: i64,
    pub daily_spendable: Decimal,
    pub monthly_summary: MonthlySummary,
    pub previous_month_savings: Decimal,
    pub charts: DashboardCharts,
}
