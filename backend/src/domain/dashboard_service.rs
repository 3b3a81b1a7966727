//! Everything the dashboard shows for one user: this month's entries and
//! totals, the spendable-per-day figure, the summaries and the chart series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::domain::clock::Clock;
use crate::domain::entry_service::EntryService;
use crate::domain::error::{TrackerError, TrackerResult};
use crate::domain::models::{Expense, Fund, User};
use crate::domain::period::MonthPeriod;
use crate::domain::summary_service::{DailySpendable, PeriodSummary, SummaryService};
use crate::storage::{DbConnection, ExpenseRepository, UserRepository};

const TOP_EXPENSE_LIMIT: u32 = 5;
const LABEL_MAX_CHARS: usize = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct TopExpense {
    pub label: String,
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub expenses_by_category: Vec<(String, Decimal)>,
    /// One point per month of the current year, January first
    pub monthly_expenses: Vec<(MonthPeriod, Decimal)>,
    /// Running balance at the end of each day so far this month
    pub balance_trend: Vec<(NaiveDate, Decimal)>,
    pub top_expenses: Vec<TopExpense>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub user: User,
    pub expenses: Vec<Expense>,
    pub funds: Vec<Fund>,
    pub total_expenses: Decimal,
    pub total_funds: Decimal,
    pub remaining_balance: Decimal,
    pub spendable: DailySpendable,
    pub monthly_summary: PeriodSummary,
    pub previous_month: PeriodSummary,
    pub charts: ChartSeries,
}

#[derive(Clone)]
pub struct DashboardService {
    summary_service: SummaryService,
    entry_service: EntryService,
    expense_repository: ExpenseRepository,
    user_repository: UserRepository,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    pub fn new(db: DbConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            summary_service: SummaryService::new(db.clone(), clock.clone()),
            entry_service: EntryService::new(db.clone(), clock.clone()),
            expense_repository: ExpenseRepository::new(db.clone()),
            user_repository: UserRepository::new(db),
            clock,
        }
    }

    pub async fn dashboard(&self, user_id: i64) -> TrackerResult<Dashboard> {
        let today = self.clock.today();
        debug!("Building dashboard for user {} on {}", user_id, today);

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(TrackerError::Unauthorized)?;

        let expenses = self.entry_service.current_month_expenses(user_id).await?;
        let funds = self.entry_service.current_month_funds(user_id).await?;
        let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
        let total_funds: Decimal = funds.iter().map(|f| f.amount).sum();
        let remaining_balance = total_funds - total_expenses;
        let spendable = self.summary_service.daily_spendable(remaining_balance);

        let monthly_summary = self.summary_service.current_month_summary(user_id).await?;
        let previous_month = self.summary_service.previous_month_savings(user_id).await?;
        let charts = self.chart_series(user_id, today, &expenses, &funds).await?;

        Ok(Dashboard {
            user,
            expenses,
            funds,
            total_expenses,
            total_funds,
            remaining_balance,
            spendable,
            monthly_summary,
            previous_month,
            charts,
        })
    }

    async fn chart_series(
        &self,
        user_id: i64,
        today: NaiveDate,
        expenses: &[Expense],
        funds: &[Fund],
    ) -> TrackerResult<ChartSeries> {
        let period = MonthPeriod::containing(today);
        let (from, to) = (period.first_day(), period.last_day());

        let expenses_by_category = self
            .expense_repository
            .category_totals_between(user_id, from, to)
            .await?;

        let mut monthly_expenses = Vec::with_capacity(12);
        for month in period.months_of_year() {
            let amount = if month.first_day() > today {
                Decimal::ZERO
            } else {
                self.summary_service
                    .period_totals(user_id, month)
                    .await?
                    .total_expenses
            };
            monthly_expenses.push((month, amount));
        }

        let top_expenses = self
            .expense_repository
            .top_between(user_id, from, to, TOP_EXPENSE_LIMIT)
            .await?
            .into_iter()
            .map(|expense| TopExpense {
                label: chart_label(expense.description.as_deref().unwrap_or(&expense.category)),
                category: expense.category,
                amount: expense.amount,
            })
            .collect();

        Ok(ChartSeries {
            expenses_by_category,
            monthly_expenses,
            balance_trend: balance_trend(period, today, expenses, funds),
            top_expenses,
        })
    }
}

/// Daily running balance from the 1st of the month to min(last day, today)
pub fn balance_trend(
    period: MonthPeriod,
    today: NaiveDate,
    expenses: &[Expense],
    funds: &[Fund],
) -> Vec<(NaiveDate, Decimal)> {
    let mut net_by_day: HashMap<NaiveDate, Decimal> = HashMap::new();
    for fund in funds.iter().filter(|f| period.contains(f.date)) {
        *net_by_day.entry(fund.date).or_default() += fund.amount;
    }
    for expense in expenses.iter().filter(|e| period.contains(e.date)) {
        *net_by_day.entry(expense.date).or_default() -= expense.amount;
    }

    let end = period.last_day().min(today);
    let mut running = Decimal::ZERO;
    period
        .first_day()
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            running += net_by_day.get(&day).copied().unwrap_or_default();
            (day, running)
        })
        .collect()
}

/// Shorten a label to 15 characters followed by "..."
pub fn chart_label(text: &str) -> String {
    if text.chars().count() > LABEL_MAX_CHARS {
        let head: String = text.chars().take(LABEL_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
