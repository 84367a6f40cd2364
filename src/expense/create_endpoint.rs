//! Defines the endpoint for creating an expense.

use axum::{Json, extract::State};
use rusqlite::{Connection, params};
use time::OffsetDateTime;

use crate::{
    Error,
    db::lock_connection,
    expense::core::{Expense, ExpenseState, NewExpense, get_expense},
};

/// A route handler for creating a new expense, responds with the created expense as JSON.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    Json(new_expense): Json<NewExpense>,
) -> Result<Json<Expense>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    create_expense(&new_expense, &connection)
        .inspect(|expense| tracing::debug!("Created expense {}", expense.id))
        .inspect_err(|error| tracing::error!("Could not create expense: {error}"))
        .map(Json)
}

/// Insert a new expense, stamping `created_at` with the current time.
///
/// Returns the expense as it was stored, including its new ID.
///
/// # Errors
/// Returns [Error::SqlError] if the insert fails.
pub fn create_expense(new_expense: &NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (name, amount, category, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            new_expense.name,
            new_expense.amount,
            new_expense.category,
            OffsetDateTime::now_utc(),
        ],
    )?;

    get_expense(connection.last_insert_rowid(), connection)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};

    use crate::{
        expense::{
            NewExpense,
            core::{ExpenseState, get_expense},
        },
        test_utils::must_create_test_connection,
    };

    use super::{create_expense, create_expense_endpoint};

    fn coffee() -> NewExpense {
        NewExpense {
            name: "Coffee".to_owned(),
            amount: 4.5,
            category: "Food".to_owned(),
        }
    }

    #[test]
    fn assigns_id_and_created_at() {
        let connection = must_create_test_connection();

        let first = create_expense(&coffee(), &connection).unwrap();
        let second = create_expense(&coffee(), &connection).unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.created_at <= second.created_at);
        assert_eq!(first.updated_at, None);
    }

    #[tokio::test]
    async fn endpoint_persists_expense() {
        let state = ExpenseState {
            db_connection: Arc::new(Mutex::new(must_create_test_connection())),
        };

        let Json(expense) = create_expense_endpoint(State(state.clone()), Json(coffee()))
            .await
            .expect("could not create expense");

        let stored = get_expense(expense.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored, expense);
        assert_eq!(stored.name, "Coffee");
        assert_eq!(stored.amount, 4.5);
        assert_eq!(stored.category, "Food");
    }
}
