//! Defines the endpoint for updating an expense.

use axum::{
    Json,
    extract::{Path, State},
};
use rusqlite::{Connection, params};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::ExpenseId,
    db::lock_connection,
    expense::core::{Expense, ExpenseState, ExpenseUpdate, get_expense},
};

/// A route handler for partially updating an expense.
///
/// Only the fields present in the request body are changed. Responds with
/// 404 if the expense does not exist.
pub async fn edit_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Json(update): Json<ExpenseUpdate>,
) -> Result<Json<Expense>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    update_expense(expense_id, &update, &connection)
        .inspect_err(|error| tracing::debug!("Could not update expense {expense_id}: {error}"))
        .map(Json)
}

type RowsAffected = usize;

/// Apply the fields set in `update` to the expense `id` and stamp `updated_at`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no expense with `id`, or
/// [Error::SqlError] if the update fails.
pub fn update_expense(
    id: ExpenseId,
    update: &ExpenseUpdate,
    connection: &Connection,
) -> Result<Expense, Error> {
    // A NULL parameter keeps the current column value.
    let rows_affected: RowsAffected = connection.execute(
        "UPDATE expense \
        SET \
            name = COALESCE(?1, name), \
            amount = COALESCE(?2, amount), \
            category = COALESCE(?3, category), \
            updated_at = ?4 \
        WHERE id = ?5",
        params![
            update.name,
            update.amount,
            update.category,
            OffsetDateTime::now_utc(),
            id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    get_expense(id, connection)
}
