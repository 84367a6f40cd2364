//! Database queries for the chart data.
//!
//! Only the columns needed for charting are read.

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::Error;

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// The sum of the amounts of every expense in the category.
    pub value: f64,
}

/// A simplified expense view for the time-bucketed series.
#[derive(Debug)]
pub(super) struct ChartExpense {
    pub amount: f64,
    pub created_at: OffsetDateTime,
}

/// Sums the amounts of all expenses grouped by category.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(super) fn get_category_totals(connection: &Connection) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT category, SUM(amount) AS total \
            FROM expense \
            GROUP BY category \
            ORDER BY category",
        )?
        .query_map([], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                value: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<CategoryTotal>, rusqlite::Error>>()
        .map_err(Error::from)
}

/// Gets the amount and creation time of every expense created at or after `since`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(super) fn get_expenses_since(
    since: OffsetDateTime,
    connection: &Connection,
) -> Result<Vec<ChartExpense>, Error> {
    // Timestamps are stored in UTC, so the bound must be too for the text comparison to hold.
    let since = since.to_offset(UtcOffset::UTC);

    connection
        .prepare("SELECT amount, created_at FROM expense WHERE created_at >= ?1")?
        .query_map(params![since], |row| {
            Ok(ChartExpense {
                amount: row.get(0)?,
                created_at: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<ChartExpense>, rusqlite::Error>>()
        .map_err(Error::from)
}
