//! Monthly aggregation: per-user totals for a calendar month, the previous
//! month's savings, and the daily spendable figure shown on the dashboard.
//!
//! A stored `monthly_savings` row is the source of truth for its period. It
//! is the only record left once the archival job has removed the detail
//! rows, so raw sums are only used when no row exists.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::clock::Clock;
use crate::domain::models::{money::CURRENCY_SCALE, MonthlySavings, PeriodTotals, TotalsSource};
use crate::domain::period::MonthPeriod;
use crate::storage::{DbConnection, ExpenseRepository, FundRepository, MonthlySavingsRepository, SummaryInsert};

/// Totals for one user and one month
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub period: MonthPeriod,
    pub totals: PeriodTotals,
}

/// How much can be spent per remaining day of the month
#[derive(Debug, Clone, PartialEq)]
pub struct DailySpendable {
    /// Days left in the month, today included
    pub remaining_days: i64,
    pub amount: Decimal,
}

#[derive(Clone)]
pub struct SummaryService {
    expense_repository: ExpenseRepository,
    fund_repository: FundRepository,
    savings_repository: MonthlySavingsRepository,
    clock: Arc<dyn Clock>,
}

impl SummaryService {
    pub fn new(db: DbConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            expense_repository: ExpenseRepository::new(db.clone()),
            fund_repository: FundRepository::new(db.clone()),
            savings_repository: MonthlySavingsRepository::new(db),
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn current_period(&self) -> MonthPeriod {
        MonthPeriod::containing(self.today())
    }

    /// Totals for a period: the stored summary if one exists, otherwise
    /// summed from the user's expense and fund rows.
    pub async fn period_totals(&self, user_id: i64, period: MonthPeriod) -> Result<PeriodTotals> {
        if let Some(stored) = self.savings_repository.find(user_id, period).await? {
            debug!("Using stored summary for user {} period {}", user_id, period);
            return Ok(stored.totals());
        }
        self.computed_totals(user_id, period).await
    }

    /// Totals summed from raw rows, ignoring any stored summary
    pub async fn computed_totals(&self, user_id: i64, period: MonthPeriod) -> Result<PeriodTotals> {
        let (from, to) = (period.first_day(), period.last_day());
        let total_expenses = self.expense_repository.total_between(user_id, from, to).await?;
        let total_funds = self.fund_repository.total_between(user_id, from, to).await?;
        Ok(PeriodTotals::computed(total_expenses, total_funds))
    }

    pub async fn monthly_summary(&self, user_id: i64, period: MonthPeriod) -> Result<PeriodSummary> {
        let totals = self.period_totals(user_id, period).await?;
        Ok(PeriodSummary { period, totals })
    }

    pub async fn current_month_summary(&self, user_id: i64) -> Result<PeriodSummary> {
        self.monthly_summary(user_id, self.current_period()).await
    }

    /// Savings of the month before the current one.
    ///
    /// That month is closed (new entries are always dated today), so freshly
    /// computed totals with any activity are stored as its summary row.
    pub async fn previous_month_savings(&self, user_id: i64) -> Result<PeriodSummary> {
        let period = self.current_period().previous();
        let totals = self.period_totals(user_id, period).await?;

        let has_activity = !totals.total_expenses.is_zero() || !totals.total_funds.is_zero();
        if totals.source == TotalsSource::Computed && has_activity {
            let row = MonthlySavings::from_totals(user_id, period, &totals);
            match self.savings_repository.insert(&row).await? {
                SummaryInsert::Inserted => {
                    info!("Stored summary for user {} closed period {}", user_id, period)
                }
                SummaryInsert::AlreadyExists => {
                    debug!("Summary for user {} period {} was stored concurrently", user_id, period)
                }
            }
        }

        Ok(PeriodSummary { period, totals })
    }

    /// Daily spendable amount for the rest of today's month
    pub fn daily_spendable(&self, remaining_balance: Decimal) -> DailySpendable {
        daily_spendable(remaining_balance, self.today())
    }
}

/// remaining_balance spread over the days left in `today`'s month, today included.
/// Rounded half away from zero to cents.
pub fn daily_spendable(remaining_balance: Decimal, today: NaiveDate) -> DailySpendable {
    let days_in_month = i64::from(MonthPeriod::containing(today).days_in_month());
    let remaining_days = days_in_month - i64::from(today.day()) + 1;

    let mut amount = if remaining_days <= 0 {
        Decimal::ZERO
    } else {
        (remaining_balance / Decimal::from(remaining_days))
            .round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    };
    amount.rescale(CURRENCY_SCALE);

    DailySpendable { remaining_days, amount }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::test_utils::{
        amount, count_rows, create_test_user, date, insert_expense, insert_fund, insert_summary,
    };

    async fn setup_test(today: NaiveDate) -> (DbConnection, SummaryService, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let user_id = create_test_user(&db, "summary@example.com").await;
        let service = SummaryService::new(db.clone(), Arc::new(FixedClock(today)));
        (db, service, user_id)
    }

    #[tokio::test]
    async fn test_empty_period_is_all_zero() {
        let (_db, service, user_id) = setup_test(date(2024, 3, 10)).await;

        let summary = service.current_month_summary(user_id).await.unwrap();
        assert_eq!(summary.totals.total_expenses, Decimal::ZERO);
        assert_eq!(summary.totals.total_funds, Decimal::ZERO);
        assert_eq!(summary.totals.savings, Decimal::ZERO);
        assert_eq!(summary.totals.source, TotalsSource::Computed);
    }

    #[tokio::test]
    async fn test_current_month_summary_scenario() {
        let (db, service, user_id) = setup_test(date(2024, 3, 21)).await;
        insert_expense(&db, user_id, date(2024, 3, 2), "Rent", "450.00").await;
        insert_expense(&db, user_id, date(2024, 3, 21), "Food", "50.00").await;
        insert_fund(&db, user_id, date(2024, 3, 1), "1200.00").await;
        // Outside the period
        insert_expense(&db, user_id, date(2024, 2, 29), "Food", "999.00").await;

        let summary = service.current_month_summary(user_id).await.unwrap();
        assert_eq!(summary.period, MonthPeriod::new(2024, 3).unwrap());
        assert_eq!(summary.totals.total_expenses, amount("500.00"));
        assert_eq!(summary.totals.total_funds, amount("1200.00"));
        assert_eq!(summary.totals.savings, amount("700.00"));
    }

    #[tokio::test]
    async fn test_savings_can_be_negative() {
        let (db, service, user_id) = setup_test(date(2024, 3, 21)).await;
        insert_expense(&db, user_id, date(2024, 3, 2), "Rent", "800.00").await;
        insert_fund(&db, user_id, date(2024, 3, 1), "250.50").await;

        let summary = service.current_month_summary(user_id).await.unwrap();
        assert_eq!(summary.totals.savings, amount("-549.50"));
    }

    #[tokio::test]
    async fn test_stored_summary_bypasses_raw_rows() {
        let (db, service, user_id) = setup_test(date(2024, 5, 10)).await;
        let period = MonthPeriod::new(2024, 1).unwrap();
        insert_expense(&db, user_id, date(2024, 1, 5), "Food", "10.00").await;
        insert_summary(&db, user_id, period, "300.00", "1000.00").await;

        let totals = service.period_totals(user_id, period).await.unwrap();
        assert_eq!(totals.source, TotalsSource::Stored);
        assert_eq!(totals.total_expenses, amount("300.00"));
        assert_eq!(totals.savings, amount("700.00"));

        sqlx::query("DELETE FROM expenses").execute(db.pool()).await.unwrap();
        let after_delete = service.period_totals(user_id, period).await.unwrap();
        assert_eq!(after_delete, totals);
    }

    #[tokio::test]
    async fn test_previous_month_of_january_is_december() {
        let (db, service, user_id) = setup_test(date(2024, 1, 15)).await;
        insert_expense(&db, user_id, date(2023, 12, 31), "Gifts", "150.00").await;
        insert_fund(&db, user_id, date(2023, 12, 1), "400.00").await;

        let previous = service.previous_month_savings(user_id).await.unwrap();
        assert_eq!(previous.period, MonthPeriod::new(2023, 12).unwrap());
        assert_eq!(previous.totals.savings, amount("250.00"));
    }

    #[tokio::test]
    async fn test_previous_month_savings_stores_closed_period_once() {
        let (db, service, user_id) = setup_test(date(2024, 4, 2)).await;
        insert_expense(&db, user_id, date(2024, 3, 3), "Food", "40.00").await;
        insert_fund(&db, user_id, date(2024, 3, 4), "100.00").await;

        let first = service.previous_month_savings(user_id).await.unwrap();
        assert_eq!(first.totals.source, TotalsSource::Computed);
        assert_eq!(count_rows(&db, "monthly_savings").await, 1);

        let second = service.previous_month_savings(user_id).await.unwrap();
        assert_eq!(second.totals.source, TotalsSource::Stored);
        assert_eq!(second.totals.savings, amount("60.00"));
        assert_eq!(count_rows(&db, "monthly_savings").await, 1);
    }

    #[tokio::test]
    async fn test_previous_month_without_activity_is_not_stored() {
        let (db, service, user_id) = setup_test(date(2024, 4, 2)).await;

        let previous = service.previous_month_savings(user_id).await.unwrap();
        assert_eq!(previous.totals.savings, Decimal::ZERO);
        assert_eq!(count_rows(&db, "monthly_savings").await, 0);
    }

    #[tokio::test]
    async fn test_current_month_is_never_stored() {
        let (db, service, user_id) = setup_test(date(2024, 4, 2)).await;
        insert_expense(&db, user_id, date(2024, 4, 1), "Food", "40.00").await;

        service.current_month_summary(user_id).await.unwrap();
        assert_eq!(count_rows(&db, "monthly_savings").await, 0);
    }

    #[test]
    fn test_daily_spendable_scenario() {
        // Day 21 of a 30-day month
        let result = daily_spendable(amount("700.00"), date(2024, 6, 21));
        assert_eq!(result.remaining_days, 10);
        assert_eq!(result.amount, amount("70.00"));
        assert_eq!(result.amount.to_string(), "70.00");
    }

    #[test]
    fn test_daily_spendable_on_last_day_uses_whole_balance() {
        let result = daily_spendable(amount("42.10"), date(2024, 2, 29));
        assert_eq!(result.remaining_days, 1);
        assert_eq!(result.amount, amount("42.10"));
    }

    #[test]
    fn test_daily_spendable_rounds_to_cents() {
        let result = daily_spendable(amount("100.00"), date(2024, 6, 28));
        assert_eq!(result.remaining_days, 3);
        assert_eq!(result.amount, amount("33.33"));
    }

    #[test]
    fn test_daily_spendable_negative_balance() {
        let result = daily_spendable(amount("-31.00"), date(2024, 1, 1));
        assert_eq!(result.remaining_days, 31);
        assert_eq!(result.amount, amount("-1.00"));
    }
}
