//! Archival of old ledger rows.
//!
//! A run snapshots every pre-cutoff month into `monthly_savings` and then
//! deletes the detail rows, all inside one transaction. If anything fails the
//! transaction is dropped and the store is left as it was.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::domain::models::{money::from_cents, LedgerTable, MonthlySavings, PeriodTotals};
use crate::domain::period::{archive_cutoff, MonthPeriod};
use crate::storage::repositories::ledger_queries;
use crate::storage::{DbConnection, MonthlySavingsRepository, SummaryInsert};

/// Which rows make a (user, month) eligible for a summary before deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveScope {
    /// Only months with expense rows are summarized; fund-only months are dropped
    ExpenseActivity,
    /// Months with expense or fund rows are summarized
    AllActivity,
}

impl ArchiveScope {
    pub fn from_summarize_fund_only(summarize_fund_only: bool) -> Self {
        if summarize_fund_only {
            ArchiveScope::AllActivity
        } else {
            ArchiveScope::ExpenseActivity
        }
    }

    fn tables(self) -> &'static [LedgerTable] {
        match self {
            ArchiveScope::ExpenseActivity => &[LedgerTable::Expenses],
            ArchiveScope::AllActivity => &[LedgerTable::Expenses, LedgerTable::Funds],
        }
    }
}

/// Outcome of one archival run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub cutoff: NaiveDate,
    pub summaries_inserted: usize,
    pub summaries_skipped: usize,
    pub expenses_deleted: u64,
    pub funds_deleted: u64,
}

#[derive(Clone)]
pub struct ArchivalService {
    db: DbConnection,
    scope: ArchiveScope,
}

impl ArchivalService {
    pub fn new(db: DbConnection, scope: ArchiveScope) -> Self {
        Self { db, scope }
    }

    pub fn scope(&self) -> ArchiveScope {
        self.scope
    }

    /// Summarize and delete everything dated before the cutoff for `today`
    pub async fn archive(&self, today: NaiveDate) -> Result<ArchiveReport> {
        let cutoff = archive_cutoff(today);
        debug!("Archiving rows dated before {} ({:?})", cutoff, self.scope);

        let mut tx = self.db.begin().await?;

        let mut targets: BTreeSet<(i64, MonthPeriod)> = BTreeSet::new();
        for &table in self.scope.tables() {
            let users = ledger_queries::users_with_rows_before(&mut *tx, table, cutoff).await?;
            for user_id in users {
                let periods = ledger_queries::periods_before(&mut *tx, table, user_id, cutoff).await?;
                targets.extend(periods.into_iter().map(|period| (user_id, period)));
            }
        }

        let mut summaries_inserted = 0;
        let mut summaries_skipped = 0;
        for (user_id, period) in targets {
            if MonthlySavingsRepository::find_with(&mut *tx, user_id, period).await?.is_some() {
                summaries_skipped += 1;
                continue;
            }

            let (from, to) = (period.first_day(), period.last_day());
            let expenses =
                ledger_queries::sum_between(&mut *tx, LedgerTable::Expenses, user_id, from, to).await?;
            let funds = ledger_queries::sum_between(&mut *tx, LedgerTable::Funds, user_id, from, to).await?;
            let totals = PeriodTotals::computed(from_cents(expenses), from_cents(funds));
            let summary = MonthlySavings::from_totals(user_id, period, &totals);

            match MonthlySavingsRepository::insert_with(&mut *tx, &summary)
                .await
                .with_context(|| format!("failed to store summary for user {user_id} period {period}"))?
            {
                SummaryInsert::Inserted => summaries_inserted += 1,
                SummaryInsert::AlreadyExists => summaries_skipped += 1,
            }
        }

        let expenses_deleted = ledger_queries::delete_before(&mut *tx, LedgerTable::Expenses, cutoff).await?;
        let funds_deleted = ledger_queries::delete_before(&mut *tx, LedgerTable::Funds, cutoff).await?;

        tx.commit().await.context("failed to commit archival run")?;

        let report = ArchiveReport {
            cutoff,
            summaries_inserted,
            summaries_skipped,
            expenses_deleted,
            funds_deleted,
        };
        info!(
            "Archival complete: cutoff {}, {} summaries inserted, {} skipped, {} expenses and {} funds deleted",
            report.cutoff,
            report.summaries_inserted,
            report.summaries_skipped,
            report.expenses_deleted,
            report.funds_deleted
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{
        amount, count_rows, create_test_user, date, insert_expense, insert_fund, insert_summary,
    };

    async fn setup_test(scope: ArchiveScope) -> (DbConnection, ArchivalService, MonthlySavingsRepository, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let user_id = create_test_user(&db, "archive@example.com").await;
        let service = ArchivalService::new(db.clone(), scope);
        let savings = MonthlySavingsRepository::new(db.clone());
        (db, service, savings, user_id)
    }

    fn period(year: i32, month: u32) -> MonthPeriod {
        MonthPeriod::new(year, month).unwrap()
    }

    #[tokio::test]
    async fn test_archive_summarizes_then_deletes() {
        let (db, service, savings, user_id) = setup_test(ArchiveScope::AllActivity).await;
        insert_expense(&db, user_id, date(2024, 1, 10), "Food", "100.00").await;
        insert_expense(&db, user_id, date(2024, 1, 20), "Food", "50.00").await;
        insert_fund(&db, user_id, date(2024, 1, 1), "400.00").await;
        insert_expense(&db, user_id, date(2024, 2, 14), "Gifts", "80.00").await;
        // On and after the cutoff; kept
        insert_expense(&db, user_id, date(2024, 3, 1), "Food", "5.00").await;
        insert_fund(&db, user_id, date(2024, 5, 2), "10.00").await;

        // 2024-05-xx gives cutoff 2024-03-01
        let report = service.archive(date(2024, 5, 15)).await.unwrap();
        assert_eq!(report.cutoff, date(2024, 3, 1));
        assert_eq!(report.summaries_inserted, 2);
        assert_eq!(report.summaries_skipped, 0);
        assert_eq!(report.expenses_deleted, 3);
        assert_eq!(report.funds_deleted, 1);

        assert_eq!(count_rows(&db, "monthly_savings").await, 2);
        assert_eq!(count_rows(&db, "expenses").await, 1);
        assert_eq!(count_rows(&db, "funds").await, 1);

        let january = savings.find(user_id, period(2024, 1)).await.unwrap().unwrap();
        assert_eq!(january.total_expenses, amount("150.00"));
        assert_eq!(january.total_funds, amount("400.00"));
        assert_eq!(january.savings, amount("250.00"));

        let february = savings.find(user_id, period(2024, 2)).await.unwrap().unwrap();
        assert_eq!(february.savings, amount("-80.00"));
    }

    #[tokio::test]
    async fn test_existing_summary_is_kept_and_skipped() {
        let (db, service, savings, user_id) = setup_test(ArchiveScope::AllActivity).await;
        insert_expense(&db, user_id, date(2024, 1, 10), "Food", "100.00").await;
        insert_summary(&db, user_id, period(2024, 1), "1.00", "2.00").await;

        let report = service.archive(date(2024, 3, 31)).await.unwrap();
        assert_eq!(report.cutoff, date(2024, 1, 1));
        assert_eq!(report.summaries_inserted, 0);
        assert_eq!(report.expenses_deleted, 0);

        let report = service.archive(date(2024, 4, 1)).await.unwrap();
        assert_eq!(report.summaries_inserted, 0);
        assert_eq!(report.summaries_skipped, 1);
        assert_eq!(report.expenses_deleted, 1);

        let stored = savings.find(user_id, period(2024, 1)).await.unwrap().unwrap();
        assert_eq!(stored.total_expenses, amount("1.00"));
    }

    #[tokio::test]
    async fn test_fund_only_period_summarized_with_all_activity() {
        let (db, service, savings, user_id) = setup_test(ArchiveScope::AllActivity).await;
        insert_fund(&db, user_id, date(2023, 11, 5), "300.00").await;

        let report = service.archive(date(2024, 1, 20)).await.unwrap();
        assert_eq!(report.cutoff, date(2023, 11, 1));
        assert_eq!(report.summaries_inserted, 0);

        let report = service.archive(date(2024, 2, 1)).await.unwrap();
        assert_eq!(report.cutoff, date(2023, 12, 1));
        assert_eq!(report.summaries_inserted, 1);
        assert_eq!(report.funds_deleted, 1);

        let stored = savings.find(user_id, period(2023, 11)).await.unwrap().unwrap();
        assert_eq!(stored.total_expenses, amount("0.00"));
        assert_eq!(stored.savings, amount("300.00"));
    }

    #[tokio::test]
    async fn test_fund_only_period_dropped_with_expense_activity() {
        let (db, service, _savings, user_id) = setup_test(ArchiveScope::ExpenseActivity).await;
        insert_fund(&db, user_id, date(2023, 11, 5), "300.00").await;

        let report = service.archive(date(2024, 2, 1)).await.unwrap();
        assert_eq!(report.summaries_inserted, 0);
        assert_eq!(report.funds_deleted, 1);
        assert_eq!(count_rows(&db, "monthly_savings").await, 0);
    }

    #[tokio::test]
    async fn test_every_user_is_summarized_before_global_delete() {
        let (db, service, savings, user_id) = setup_test(ArchiveScope::ExpenseActivity).await;
        let other = create_test_user(&db, "other@example.com").await;
        insert_expense(&db, user_id, date(2024, 1, 3), "Food", "10.00").await;
        insert_expense(&db, other, date(2023, 12, 24), "Gifts", "70.00").await;
        insert_fund(&db, other, date(2023, 12, 1), "100.00").await;

        // Cutoff 2024-02-01
        let report = service.archive(date(2024, 4, 10)).await.unwrap();
        assert_eq!(report.summaries_inserted, 2);
        assert_eq!(report.expenses_deleted, 2);
        assert_eq!(report.funds_deleted, 1);

        let december = savings.find(other, period(2023, 12)).await.unwrap().unwrap();
        assert_eq!(december.savings, amount("30.00"));
        assert!(savings.find(user_id, period(2024, 1)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_archive_with_nothing_to_do() {
        let (_db, service, _savings, _user_id) = setup_test(ArchiveScope::AllActivity).await;

        let report = service.archive(date(2024, 3, 10)).await.unwrap();
        assert_eq!(
            report,
            ArchiveReport {
                cutoff: date(2024, 1, 1),
                summaries_inserted: 0,
                summaries_skipped: 0,
                expenses_deleted: 0,
                funds_deleted: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_repeated_run_is_a_no_op() {
        let (db, service, _savings, user_id) = setup_test(ArchiveScope::AllActivity).await;
        insert_expense(&db, user_id, date(2024, 1, 3), "Food", "10.00").await;

        service.archive(date(2024, 4, 10)).await.unwrap();
        let second = service.archive(date(2024, 4, 11)).await.unwrap();
        assert_eq!(second.summaries_inserted, 0);
        assert_eq!(second.expenses_deleted, 0);
        assert_eq!(count_rows(&db, "monthly_savings").await, 1);
    }

    #[test]
    fn test_scope_from_config_flag() {
        assert_eq!(ArchiveScope::from_summarize_fund_only(true), ArchiveScope::AllActivity);
        assert_eq!(ArchiveScope::from_summarize_fund_only(false), ArchiveScope::ExpenseActivity);
    }
}
