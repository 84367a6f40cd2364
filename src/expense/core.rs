//! Defines the core data models and database queries for expenses.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{AppState, Error, database_id::ExpenseId};

// ============================================================================
// MODELS
// ============================================================================

/// A single spending record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// What the money was spent on, e.g. "Coffee".
    pub name: String,
    /// How much was spent.
    pub amount: f64,
    /// A free-form label used to group expenses, e.g. "Food".
    pub category: String,
    /// When the expense was recorded. Set by the server on insert.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the expense was last changed, `None` if it has never been updated.
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub updated_at: Option<OffsetDateTime>,
}

/// The data needed to create an [Expense]. All fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    /// What the money was spent on.
    pub name: String,
    /// How much was spent.
    pub amount: f64,
    /// The label used to group the expense.
    pub category: String,
}

/// A partial update for an [Expense].
///
/// Only the fields that are `Some` are written, everything else is left as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    /// The new name, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The new amount, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// The new category, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// ============================================================================
// STATE
// ============================================================================

/// The state needed by the expense endpoints.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

// ============================================================================
// DATABASE
// ============================================================================

pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT
        )",
        (),
    )?;

    // Listing sorts by creation time and the charts filter on it.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_created_at ON expense(created_at)",
        (),
    )?;

    Ok(())
}

/// The columns of the expense table in the order [map_row_to_expense] expects.
pub const EXPENSE_COLUMNS: &str = "id, name, amount, category, created_at, updated_at";

pub fn map_row_to_expense(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let created_at = row.get(4)?;
    let updated_at = row.get(5)?;

    Ok(Expense {
        id,
        name,
        amount,
        category,
        created_at,
        updated_at,
    })
}

/// Get a single expense by its ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no expense with `id`, or
/// [Error::SqlError] if the query fails.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .query_row(
            &format!("SELECT {EXPENSE_COLUMNS} FROM expense WHERE id = ?1"),
            params![id],
            map_row_to_expense,
        )
        .map_err(Error::from)
}
