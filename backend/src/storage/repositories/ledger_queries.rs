//! Aggregate queries shared by the expense and fund tables.
//!
//! Every function takes an executor so the same SQL runs against the pool
//! for request paths and against an open transaction for archival.

use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{Row, SqliteExecutor};
use tracing::warn;

use crate::domain::models::LedgerTable;
use crate::domain::period::MonthPeriod;

/// SUM(amount) in cents for one user over an inclusive date range; 0 when no rows match
pub async fn sum_between<'e, E>(
    executor: E,
    table: LedgerTable,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT COALESCE(SUM(amount_cents), 0) FROM {} WHERE user_id = ? AND date BETWEEN ? AND ?",
        table.table_name()
    );
    let total: i64 = sqlx::query_scalar(&sql)
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_one(executor)
        .await?;
    Ok(total)
}

/// Distinct users owning at least one row dated before `cutoff`
pub async fn users_with_rows_before<'e, E>(
    executor: E,
    table: LedgerTable,
    cutoff: NaiveDate,
) -> Result<Vec<i64>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT DISTINCT user_id FROM {} WHERE date < ? ORDER BY user_id",
        table.table_name()
    );
    let users: Vec<i64> = sqlx::query_scalar(&sql)
        .bind(cutoff)
        .fetch_all(executor)
        .await?;
    Ok(users)
}

/// Distinct (month, year) periods present among a user's rows dated before `cutoff`
pub async fn periods_before<'e, E>(
    executor: E,
    table: LedgerTable,
    user_id: i64,
    cutoff: NaiveDate,
) -> Result<Vec<MonthPeriod>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        r#"
        SELECT DISTINCT
            CAST(strftime('%Y', date) AS INTEGER) AS year,
            CAST(strftime('%m', date) AS INTEGER) AS month
        FROM {}
        WHERE user_id = ? AND date < ?
        ORDER BY year, month
        "#,
        table.table_name()
    );
    let rows = sqlx::query(&sql)
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(executor)
        .await?;

    let mut periods = Vec::with_capacity(rows.len());
    for row in rows {
        let year: Option<i64> = row.try_get("year")?;
        let month: Option<i64> = row.try_get("month")?;
        let period = match (year, month) {
            (Some(year), Some(month)) => i32::try_from(year)
                .ok()
                .zip(u32::try_from(month).ok())
                .and_then(|(year, month)| MonthPeriod::new(year, month)),
            _ => None,
        };
        match period {
            Some(period) => periods.push(period),
            None => warn!(
                "Skipping unparseable date in {} for user {}",
                table.table_name(),
                user_id
            ),
        }
    }
    Ok(periods)
}

/// Delete every row dated before `cutoff`, across all users
pub async fn delete_before<'e, E>(executor: E, table: LedgerTable, cutoff: NaiveDate) -> Result<u64>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("DELETE FROM {} WHERE date < ?", table.table_name());
    let result = sqlx::query(&sql).bind(cutoff).execute(executor).await?;
    Ok(result.rows_affected())
}
