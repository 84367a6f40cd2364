//! Defines the endpoint for listing expenses a page at a time.

use axum::{
    Json,
    extract::{Query, State},
};
use rusqlite::{Connection, params};
use serde::Deserialize;

use crate::{
    Error,
    db::lock_connection,
    expense::core::{EXPENSE_COLUMNS, Expense, ExpenseState, map_row_to_expense},
};

/// The number of expenses to return when `limit` is not given.
pub const DEFAULT_LIMIT: u32 = 100;

/// Offset/limit pagination for the expense list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    /// How many of the newest expenses to skip.
    #[serde(default)]
    pub skip: u32,
    /// The maximum number of expenses to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// A route handler for listing expenses, newest first.
pub async fn list_expenses_endpoint(
    State(state): State<ExpenseState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    list_expenses(query, &connection)
        .inspect_err(|error| tracing::error!("Could not list expenses: {error}"))
        .map(Json)
}

/// Get the expenses ordered by creation time, newest first, skipping the
/// first `query.skip` and returning at most `query.limit`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn list_expenses(query: ListQuery, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense \
            ORDER BY created_at DESC, id DESC \
            LIMIT ?1 OFFSET ?2"
        ))?
        .query_map(params![query.limit, query.skip], map_row_to_expense)?
        .collect::<Result<Vec<Expense>, rusqlite::Error>>()
        .map_err(Error::from)
}
