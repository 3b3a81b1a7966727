use crate::domain::dashboard_service::{ChartSeries, Dashboard};
use crate::io::rest::mappers::{AccountMapper, EntryMapper, SummaryMapper};
use shared::{BalancePoint, CategoryTotal, DashboardCharts, DashboardResponse, MonthlyExpensePoint, TopExpense};

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_dto(dashboard: Dashboard) -> DashboardResponse {
        DashboardResponse {
            user: AccountMapper::to_profile(dashboard.user),
            expenses: dashboard.expenses.into_iter().map(EntryMapper::expense_to_dto).collect(),
            funds: dashboard.funds.into_iter().map(EntryMapper::fund_to_dto).collect(),
            total_expenses: dashboard.total_expenses,
            total_funds: dashboard.total_funds,
            remaining_balance: dashboard.remaining_balance,
            remaining_days: dashboard.spendable.remaining_days,
            daily_spendable: dashboard.spendable.amount,
            monthly_summary: SummaryMapper::to_dto(dashboard.monthly_summary),
            previous_month_savings: dashboard.previous_month.totals.savings,
            charts: Self::charts_to_dto(dashboard.charts),
        }
    }

    fn charts_to_dto(charts: ChartSeries) -> DashboardCharts {
        DashboardCharts {
            expenses_by_category: charts
                .expenses_by_category
                .into_iter()
                .map(|(category, total)| CategoryTotal { category, total })
                .collect(),
            monthly_expenses: charts
                .monthly_expenses
                .into_iter()
                .map(|(period, amount)| MonthlyExpensePoint {
                    month: period.month_abbr().to_string(),
                    amount,
                })
                .collect(),
            balance_trend: charts
                .balance_trend
                .into_iter()
                .map(|(date, balance)| BalancePoint { date, balance })
                .collect(),
            top_expenses: charts
                .top_expenses
                .into_iter()
                .map(|top| TopExpense {
                    label: top.label,
                    category: top.category,
                    amount: top.amount,
                })
                .collect(),
        }
    }
}
