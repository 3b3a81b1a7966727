use crate::domain::summary_service::PeriodSummary;
use shared::{MonthlySummary, PreviousMonthSavingsResponse};

pub struct SummaryMapper;

impl SummaryMapper {
    pub fn to_dto(summary: PeriodSummary) -> MonthlySummary {
        MonthlySummary {
            month: summary.period.month_name().to_string(),
            year: summary.period.year(),
            total_expenses: summary.totals.total_expenses,
            total_funds: summary.totals.total_funds,
            savings: summary.totals.savings,
        }
    }

    pub fn to_previous_savings(summary: PeriodSummary) -> PreviousMonthSavingsResponse {
        PreviousMonthSavingsResponse {
            month: summary.period.month_name().to_string(),
            year: summary.period.year(),
            savings: summary.totals.savings,
        }
    }
}
