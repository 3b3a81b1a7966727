use anyhow::{anyhow, Result};
use sqlx::{sqlite::SqliteRow, Row, SqliteExecutor};
use tracing::debug;

use crate::domain::models::{
    money::{from_cents, to_cents},
    MonthlySavings,
};
use crate::domain::period::MonthPeriod;
use crate::storage::connection::DbConnection;

/// Outcome of inserting a summary row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryInsert {
    Inserted,
    /// The (user, month, year) row already existed; nothing was written
    AlreadyExists,
}

/// Repository for monthly_savings rows
#[derive(Clone)]
pub struct MonthlySavingsRepository {
    db: DbConnection,
}

impl MonthlySavingsRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, user_id: i64, period: MonthPeriod) -> Result<Option<MonthlySavings>> {
        Self::find_with(self.db.pool(), user_id, period).await
    }

    pub async fn insert(&self, summary: &MonthlySavings) -> Result<SummaryInsert> {
        Self::insert_with(self.db.pool(), summary).await
    }

    pub async fn find_with<'e, E>(executor: E, user_id: i64, period: MonthPeriod) -> Result<Option<MonthlySavings>>
    where
        E: SqliteExecutor<'e>,
    {
        let row = sqlx::query(
            r#"
            SELECT user_id, month, year, total_expenses_cents, total_funds_cents, savings_cents
            FROM monthly_savings
            WHERE user_id = ? AND month = ? AND year = ?
            "#,
        )
        .bind(user_id)
        .bind(period.month())
        .bind(period.year())
        .fetch_optional(executor)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Insert a summary row. A unique-constraint violation means another writer
    /// summarized the period first and is reported as `AlreadyExists`.
    pub async fn insert_with<'e, E>(executor: E, summary: &MonthlySavings) -> Result<SummaryInsert>
    where
        E: SqliteExecutor<'e>,
    {
        let cents = |value| {
            to_cents(value).ok_or_else(|| anyhow!("summary amount {value} is not representable in cents"))
        };

        let result = sqlx::query(
            r#"
            INSERT INTO monthly_savings
                (user_id, month, year, total_expenses_cents, total_funds_cents, savings_cents)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(summary.user_id)
        .bind(summary.period.month())
        .bind(summary.period.year())
        .bind(cents(summary.total_expenses)?)
        .bind(cents(summary.total_funds)?)
        .bind(cents(summary.savings)?)
        .execute(executor)
        .await;

        match result {
            Ok(_) => Ok(SummaryInsert::Inserted),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(
                    "Summary for user {} period {} already exists",
                    summary.user_id, summary.period
                );
                Ok(SummaryInsert::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn map_row(row: &SqliteRow) -> Result<MonthlySavings> {
        let month: u32 = row.try_get("month")?;
        let year: i32 = row.try_get("year")?;
        let period = MonthPeriod::new(year, month)
            .ok_or_else(|| anyhow!("invalid period {year}-{month} in monthly_savings"))?;

        Ok(MonthlySavings {
            user_id: row.try_get("user_id")?,
            period,
            total_expenses: from_cents(row.try_get("total_expenses_cents")?),
            total_funds: from_cents(row.try_get("total_funds_cents")?),
            savings: from_cents(row.try_get("savings_cents")?),
        })
    }
}
