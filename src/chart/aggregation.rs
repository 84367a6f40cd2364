//! Bucketing of expenses into the fixed-size chart series.
//!
//! The daily series always has 30 slots and the monthly series 12. Expenses
//! on the 31st of a month fall outside the daily series, and the monthly
//! series groups by month of year only, so the same month in two different
//! years shares a bucket.

use time::{Duration, OffsetDateTime, UtcOffset};

use crate::chart::query::ChartExpense;

/// The number of slots in the day-of-month series.
pub const DAYS_IN_CHART: usize = 30;
/// The number of slots in the month-of-year series.
pub const MONTHS_IN_CHART: usize = 12;
/// How far back the month-of-year series looks.
pub(super) const YEARLY_PERIOD_DAYS: i64 = 365;

/// Sums expense amounts by local day of month, index 0 is the 1st.
pub(super) fn aggregate_by_day_of_month(
    expenses: &[ChartExpense],
    local_offset: UtcOffset,
) -> [f64; DAYS_IN_CHART] {
    let mut totals = [0.0; DAYS_IN_CHART];

    for expense in expenses {
        let day = usize::from(expense.created_at.to_offset(local_offset).day());

        if let Some(total) = day.checked_sub(1).and_then(|index| totals.get_mut(index)) {
            *total += expense.amount;
        }
    }

    totals
}

/// Sums expense amounts by local month of year, index 0 is January.
pub(super) fn aggregate_by_month_of_year(
    expenses: &[ChartExpense],
    local_offset: UtcOffset,
) -> [f64; MONTHS_IN_CHART] {
    let mut totals = [0.0; MONTHS_IN_CHART];

    for expense in expenses {
        let month = u8::from(expense.created_at.to_offset(local_offset).month());
        totals[usize::from(month) - 1] += expense.amount;
    }

    totals
}

/// Local midnight on the first day of the month containing `now`.
pub(super) fn start_of_month(now: OffsetDateTime, local_offset: UtcOffset) -> OffsetDateTime {
    let local_now = now.to_offset(local_offset);
    let first_day = local_now.date() - Duration::days(i64::from(local_now.day()) - 1);

    first_day.midnight().assume_offset(local_offset)
}

/// The start of the trailing window for the month-of-year series.
pub(super) fn start_of_yearly_period(now: OffsetDateTime) -> OffsetDateTime {
    now - Duration::days(YEARLY_PERIOD_DAYS)
}
