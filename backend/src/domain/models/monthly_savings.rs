//! Per-period totals and the stored summary row that outlives archived detail rows.
use rust_decimal::Decimal;

use crate::domain::period::MonthPeriod;

/// Where a set of totals came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsSource {
    /// Read back from a monthly_savings row
    Stored,
    /// Summed from expense and fund rows
    Computed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotals {
    pub total_expenses: Decimal,
    pub total_funds: Decimal,
    pub savings: Decimal,
    pub source: TotalsSource,
}

impl PeriodTotals {
    /// Totals computed from raw sums. Savings is signed.
    pub fn computed(total_expenses: Decimal, total_funds: Decimal) -> Self {
        Self {
            total_expenses,
            total_funds,
            savings: total_funds - total_expenses,
            source: TotalsSource::Computed,
        }
    }
}

/// One row of monthly_savings
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySavings {
    pub user_id: i64,
    pub period: MonthPeriod,
    pub total_expenses: Decimal,
    pub total_funds: Decimal,
    pub savings: Decimal,
}

impl MonthlySavings {
    pub fn from_totals(user_id: i64, period: MonthPeriod, totals: &PeriodTotals) -> Self {
        Self {
            user_id,
            period,
            total_expenses: totals.total_expenses,
            total_funds: totals.total_funds,
            savings: totals.savings,
        }
    }

    pub fn totals(&self) -> PeriodTotals {
        PeriodTotals {
            total_expenses: self.total_expenses,
            total_funds: self.total_funds,
            savings: self.savings,
            source: TotalsSource::Stored,
        }
    }
}
