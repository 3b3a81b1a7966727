//! Fixtures shared by the storage, domain and REST tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain::models::{money::to_cents, MonthlySavings};
use crate::domain::period::MonthPeriod;
use crate::storage::DbConnection;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn amount(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid test amount")
}

/// Insert a user directly and return its id
pub async fn create_test_user(db: &DbConnection, email: &str) -> i64 {
    sqlx::query("INSERT INTO users (name, email, password_hash) VALUES (?, ?, ?)")
        .bind("Test User")
        .bind(email)
        .bind("not-a-real-hash")
        .execute(db.pool())
        .await
        .expect("Failed to create test user")
        .last_insert_rowid()
}

pub async fn insert_expense(db: &DbConnection, user_id: i64, on: NaiveDate, category: &str, value: &str) {
    sqlx::query("INSERT INTO expenses (user_id, date, category, amount_cents) VALUES (?, ?, ?, ?)")
        .bind(user_id)
        .bind(on)
        .bind(category)
        .bind(to_cents(amount(value)).expect("cent amount"))
        .execute(db.pool())
        .await
        .expect("Failed to insert expense");
}

pub async fn insert_fund(db: &DbConnection, user_id: i64, on: NaiveDate, value: &str) {
    sqlx::query("INSERT INTO funds (user_id, date, amount_cents) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(on)
        .bind(to_cents(amount(value)).expect("cent amount"))
        .execute(db.pool())
        .await
        .expect("Failed to insert fund");
}

pub async fn insert_summary(db: &DbConnection, user_id: i64, period: MonthPeriod, expenses: &str, funds: &str) {
    let total_expenses = amount(expenses);
    let total_funds = amount(funds);
    let row = MonthlySavings {
        user_id,
        period,
        total_expenses,
        total_funds,
        savings: total_funds - total_expenses,
    };
    crate::storage::MonthlySavingsRepository::insert_with(db.pool(), &row)
        .await
        .expect("Failed to insert summary");
}

pub async fn count_rows(db: &DbConnection, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(db.pool())
        .await
        .expect("Failed to count rows")
}
