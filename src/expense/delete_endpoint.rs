//! Defines the endpoint for deleting an expense.

use axum::{
    Json,
    extract::{Path, State},
};
use rusqlite::{Connection, params};
use serde_json::{Value, json};

use crate::{
    Error,
    database_id::ExpenseId,
    db::lock_connection,
    expense::core::{Expense, ExpenseState, get_expense},
};

/// A route handler for deleting an expense, responds with a confirmation message.
///
/// Responds with 404 if the expense does not exist.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Json<Value>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let deleted = delete_expense(expense_id, &connection)?;
    tracing::debug!("Deleted expense {} ({})", deleted.id, deleted.name);

    Ok(Json(json!({ "message": "Expense deleted successfully" })))
}

/// Delete the expense `id`, returning the expense as it was before deletion.
///
/// # Errors
/// Returns [Error::NotFound] if there is no expense with `id`, or
/// [Error::SqlError] if the delete fails.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let transaction = connection.unchecked_transaction()?;

    let expense = get_expense(id, &transaction)?;
    transaction.execute("DELETE FROM expense WHERE id = ?1", params![id])?;

    transaction.commit()?;

    Ok(expense)
}
