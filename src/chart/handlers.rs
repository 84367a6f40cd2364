//! The chart data endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    chart::{
        aggregation::{
            DAYS_IN_CHART, MONTHS_IN_CHART, aggregate_by_day_of_month,
            aggregate_by_month_of_year, start_of_month, start_of_yearly_period,
        },
        query::{CategoryTotal, get_category_totals, get_expenses_since},
    },
    db::lock_connection,
    timezone::get_local_offset,
};

/// The state needed for computing chart data.
#[derive(Debug, Clone)]
pub struct ChartState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ChartState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The three series the frontend charts display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Total spent per category, across all expenses.
    pub area_chart: Vec<CategoryTotal>,
    /// Total spent per day of the current month, index 0 is the 1st.
    pub bar_chart: [f64; DAYS_IN_CHART],
    /// Total spent per month of year over the last 365 days, index 0 is January.
    pub line_chart: [f64; MONTHS_IN_CHART],
}

/// A route handler for getting the chart data.
pub async fn get_chart_data_endpoint(
    State(state): State<ChartState>,
) -> Result<Json<ChartData>, Error> {
    // The current offset is applied to every expense, so in zones with daylight
    // saving an expense near midnight in the other season can land one day or
    // month off.
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let connection = lock_connection(&state.db_connection)?;

    get_chart_data(OffsetDateTime::now_utc(), local_offset, &connection)
        .inspect_err(|error| tracing::error!("Could not build chart data: {error}"))
        .map(Json)
}

/// Compute the category, day-of-month and month-of-year series as of `now`.
///
/// `local_offset` decides which calendar day and month an expense falls on.
///
/// # Errors
/// Returns [Error::SqlError] if any of the queries fail.
pub fn get_chart_data(
    now: OffsetDateTime,
    local_offset: UtcOffset,
    connection: &Connection,
) -> Result<ChartData, Error> {
    let area_chart = get_category_totals(connection)?;

    let this_month = get_expenses_since(start_of_month(now, local_offset), connection)?;
    let bar_chart = aggregate_by_day_of_month(&this_month, local_offset);

    let last_year = get_expenses_since(start_of_yearly_period(now), connection)?;
    let line_chart = aggregate_by_month_of_year(&last_year, local_offset);

    Ok(ChartData {
        area_chart,
        bar_chart,
        line_chart,
    })
}

#[cfg(test)]
mod tests {
    use time::{UtcOffset, macros::datetime};

    use crate::{
        chart::query::CategoryTotal,
        test_utils::{insert_expense_at, must_create_test_connection},
    };

    use super::get_chart_data;

    #[test]
    fn empty_database_gives_zeroed_series() {
        let connection = must_create_test_connection();

        let data =
            get_chart_data(datetime!(2025-06-15 12:00 UTC), UtcOffset::UTC, &connection).unwrap();

        assert!(data.area_chart.is_empty());
        assert_eq!(data.bar_chart, [0.0; 30]);
        assert_eq!(data.line_chart, [0.0; 12]);
    }

    #[test]
    fn category_totals_cover_all_expenses() {
        let connection = must_create_test_connection();
        insert_expense_at("a1", 10.0, "A", datetime!(2020-01-01 12:00 UTC), &connection);
        insert_expense_at("b1", 5.0, "B", datetime!(2025-06-02 12:00 UTC), &connection);
        insert_expense_at("a2", 3.0, "A", datetime!(2025-06-03 12:00 UTC), &connection);

        let data =
            get_chart_data(datetime!(2025-06-15 12:00 UTC), UtcOffset::UTC, &connection).unwrap();

        assert_eq!(
            data.area_chart,
            vec![
                CategoryTotal {
                    category: "A".to_owned(),
                    value: 13.0
                },
                CategoryTotal {
                    category: "B".to_owned(),
                    value: 5.0
                },
            ]
        );
    }

    #[test]
    fn daily_series_only_counts_current_month() {
        let connection = must_create_test_connection();
        insert_expense_at("last month", 8.0, "A", datetime!(2025-05-31 23:00 UTC), &connection);
        insert_expense_at("first", 2.0, "A", datetime!(2025-06-01 00:00 UTC), &connection);
        insert_expense_at("tenth", 6.0, "B", datetime!(2025-06-10 09:00 UTC), &connection);

        let data =
            get_chart_data(datetime!(2025-06-15 12:00 UTC), UtcOffset::UTC, &connection).unwrap();

        assert_eq!(data.bar_chart.len(), 30);
        assert_eq!(data.bar_chart[0], 2.0);
        assert_eq!(data.bar_chart[9], 6.0);
        assert_eq!(data.bar_chart.iter().sum::<f64>(), 8.0);
    }

    #[test]
    fn day_31_is_in_no_daily_bucket() {
        let connection = must_create_test_connection();
        insert_expense_at("day 31", 9.0, "A", datetime!(2025-01-31 09:00 UTC), &connection);

        let data =
            get_chart_data(datetime!(2025-01-31 12:00 UTC), UtcOffset::UTC, &connection).unwrap();

        assert_eq!(data.bar_chart, [0.0; 30]);
        assert_eq!(data.line_chart[0], 9.0);
    }

    #[test]
    fn monthly_series_covers_trailing_year() {
        let connection = must_create_test_connection();
        insert_expense_at("too old", 100.0, "A", datetime!(2024-06-14 12:00 UTC), &connection);
        insert_expense_at("last july", 7.0, "A", datetime!(2024-07-01 12:00 UTC), &connection);
        insert_expense_at("june", 1.0, "A", datetime!(2025-06-01 12:00 UTC), &connection);
        insert_expense_at("march", 4.0, "A", datetime!(2025-03-20 12:00 UTC), &connection);

        let data =
            get_chart_data(datetime!(2025-06-15 12:00 UTC), UtcOffset::UTC, &connection).unwrap();

        assert_eq!(data.line_chart[2], 4.0);
        assert_eq!(data.line_chart[5], 1.0);
        assert_eq!(data.line_chart[6], 7.0);
        assert_eq!(data.line_chart.iter().sum::<f64>(), 12.0);
    }
}
