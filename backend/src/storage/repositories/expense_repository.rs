use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::{
    money::{from_cents, to_cents},
    Expense, LedgerTable, NewExpense,
};
use crate::storage::connection::DbConnection;
use crate::storage::repositories::ledger_queries;

/// Repository for expense operations
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store an expense and return it with its assigned id
    pub async fn store_expense(&self, expense: &NewExpense) -> Result<Expense> {
        let amount_cents = to_cents(expense.amount)
            .ok_or_else(|| anyhow!("expense amount {} is not representable in cents", expense.amount))?;

        let result = sqlx::query(
            r#"
            INSERT INTO expenses (user_id, date, category, amount_cents, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.user_id)
        .bind(expense.date)
        .bind(&expense.category)
        .bind(amount_cents)
        .bind(&expense.description)
        .execute(self.db.pool())
        .await?;

        Ok(Expense {
            id: result.last_insert_rowid(),
            user_id: expense.user_id,
            date: expense.date,
            category: expense.category.clone(),
            amount: from_cents(amount_cents),
            description: expense.description.clone(),
        })
    }

    /// List a user's expenses in an inclusive date range, newest first
    pub async fn list_between(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, date, category, amount_cents, description
            FROM expenses
            WHERE user_id = ? AND date BETWEEN ? AND ?
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// The `limit` largest expenses in a date range
    pub async fn top_between(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
        limit: u32,
    ) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, date, category, amount_cents, description
            FROM expenses
            WHERE user_id = ? AND date BETWEEN ? AND ?
            ORDER BY amount_cents DESC, id ASC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .bind(i64::from(limit))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Sum of expense amounts per category in a date range, largest first
    pub async fn category_totals_between(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(String, Decimal)>> {
        let rows = sqlx::query(
            r#"
            SELECT category, SUM(amount_cents) AS total_cents
            FROM expenses
            WHERE user_id = ? AND date BETWEEN ? AND ?
            GROUP BY category
            ORDER BY total_cents DESC, category ASC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let category: String = row.try_get("category")?;
                let total_cents: i64 = row.try_get("total_cents")?;
                Ok((category, from_cents(total_cents)))
            })
            .collect()
    }

    /// Total expenses for a user in a date range; zero when there are none
    pub async fn total_between(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Decimal> {
        let cents =
            ledger_queries::sum_between(self.db.pool(), LedgerTable::Expenses, user_id, from, to).await?;
        Ok(from_cents(cents))
    }

    fn map_row(row: &SqliteRow) -> Result<Expense> {
        Ok(Expense {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            date: row.try_get("date")?,
            category: row.try_get("category")?,
            amount: from_cents(row.try_get("amount_cents")?),
            description: row.try_get("description")?,
        })
    }
}
