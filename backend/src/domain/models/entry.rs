//! Domain models for the two kinds of detail rows: expenses and fund deposits.
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fund {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFund {
    pub user_id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// The detail tables that the aggregator sums and the archival job prunes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerTable {
    Expenses,
    Funds,
}

impl LedgerTable {
    pub fn table_name(self) -> &'static str {
        match self {
            LedgerTable::Expenses => "expenses",
            LedgerTable::Funds => "funds",
        }
    }
}
