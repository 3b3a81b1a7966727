use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::Row;

use crate::domain::models::{
    money::{from_cents, to_cents},
    Fund, LedgerTable, NewFund,
};
use crate::storage::connection::DbConnection;
use crate::storage::repositories::ledger_queries;

/// Repository for fund deposits
#[derive(Clone)]
pub struct FundRepository {
    db: DbConnection,
}

impl FundRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_fund(&self, fund: &NewFund) -> Result<Fund> {
        let amount_cents = to_cents(fund.amount)
            .ok_or_else(|| anyhow!("fund amount {} is not representable in cents", fund.amount))?;

        let result = sqlx::query(
            r#"
            INSERT INTO funds (user_id, date, amount_cents)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(fund.user_id)
        .bind(fund.date)
        .bind(amount_cents)
        .execute(self.db.pool())
        .await?;

        Ok(Fund {
            id: result.last_insert_rowid(),
            user_id: fund.user_id,
            date: fund.date,
            amount: from_cents(amount_cents),
        })
    }

    /// List a user's fund deposits in an inclusive date range, newest first
    pub async fn list_between(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<Fund>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, date, amount_cents
            FROM funds
            WHERE user_id = ? AND date BETWEEN ? AND ?
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(Fund {
                    id: row.try_get("id")?,
                    user_id: row.try_get("user_id")?,
                    date: row.try_get("date")?,
                    amount: from_cents(row.try_get("amount_cents")?),
                })
            })
            .collect()
    }

    pub async fn total_between(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Decimal> {
        let cents =
            ledger_queries::sum_between(self.db.pool(), LedgerTable::Funds, user_id, from, to).await?;
        Ok(from_cents(cents))
    }
}
