//! Chart module
//!
//! Derives the read-only aggregations the frontend charts display: totals by
//! category, by day of the current month and by month of year.

mod aggregation;
mod handlers;
mod query;

pub use aggregation::{DAYS_IN_CHART, MONTHS_IN_CHART};
pub use handlers::{ChartData, get_chart_data, get_chart_data_endpoint};
pub use query::CategoryTotal;
