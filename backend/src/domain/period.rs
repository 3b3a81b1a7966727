//! Calendar-month arithmetic shared by the aggregator and the archival job.
//!
//! A [`MonthPeriod`] is a (month, year) pair. All range queries use the
//! inclusive [`MonthPeriod::first_day`, `MonthPeriod::last_day`] window.

use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;

/// Detail rows older than this many whole months are archived.
pub const RETENTION_MONTHS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthPeriod {
    // Always the 1st of the month.
    first: NaiveDate,
}

impl MonthPeriod {
    /// Build a period from a 1-based month and a year. Returns None for
    /// month outside 1..=12 or a year chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// The period a given day belongs to
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + Days::new(u64::from(self.days_in_month() - 1))
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            2 => {
                if is_leap_year(self.year()) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// The month before this one; January rolls back to December of the previous year.
    pub fn previous(&self) -> Self {
        self.months_back(1)
    }

    pub fn months_back(&self, months: u32) -> Self {
        Self {
            first: self.first - Months::new(months),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    pub fn month_name(&self) -> &'static str {
        match self.month() {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            _ => "December",
        }
    }

    pub fn month_abbr(&self) -> &'static str {
        &self.month_name()[..3]
    }

    /// All twelve periods of the given period's year, January first
    pub fn months_of_year(&self) -> impl Iterator<Item = MonthPeriod> {
        let year = self.year();
        (1..=12).filter_map(move |month| MonthPeriod::new(year, month))
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// First day of the month [`RETENTION_MONTHS`] before `today`'s month.
/// Everything dated strictly before it is eligible for archival.
pub fn archive_cutoff(today: NaiveDate) -> NaiveDate {
    MonthPeriod::containing(today)
        .months_back(RETENTION_MONTHS)
        .first_day()
}
