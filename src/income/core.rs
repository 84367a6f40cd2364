//! The monthly income model and its database queries.
//!
//! The `monthly_income` table holds a single row by convention. Nothing in
//! the schema enforces this; the queries here always use the row with the
//! lowest ID and create it on first read.

use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId};

/// The amount a freshly created income row starts with.
pub const DEFAULT_MONTHLY_INCOME: f64 = 3000.0;

/// The user's declared monthly income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIncome {
    /// The ID of the income row.
    pub id: DatabaseId,
    /// The income amount.
    pub amount: f64,
    /// When the amount was last set, `None` if it is still the default.
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub updated_at: Option<OffsetDateTime>,
}

/// The request body for setting the monthly income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeForm {
    /// The new income amount.
    pub amount: f64,
}

pub fn create_monthly_income_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS monthly_income (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL DEFAULT {DEFAULT_MONTHLY_INCOME},
                updated_at TEXT
            )"
        ),
        (),
    )?;

    Ok(())
}

fn map_row_to_monthly_income(row: &Row) -> Result<MonthlyIncome, rusqlite::Error> {
    Ok(MonthlyIncome {
        id: row.get(0)?,
        amount: row.get(1)?,
        updated_at: row.get(2)?,
    })
}

/// Get the income row, creating it with [DEFAULT_MONTHLY_INCOME] if the table is empty.
///
/// # Errors
/// Returns [Error::SqlError] if a query fails.
pub fn get_monthly_income(connection: &Connection) -> Result<MonthlyIncome, Error> {
    let existing = connection
        .query_row(
            "SELECT id, amount, updated_at FROM monthly_income ORDER BY id LIMIT 1",
            [],
            map_row_to_monthly_income,
        )
        .optional()?;

    match existing {
        Some(income) => Ok(income),
        None => {
            tracing::info!("No monthly income found, creating default of {DEFAULT_MONTHLY_INCOME}");
            connection.execute(
                "INSERT INTO monthly_income (amount) VALUES (?1)",
                params![DEFAULT_MONTHLY_INCOME],
            )?;

            select_monthly_income(connection.last_insert_rowid(), connection)
        }
    }
}

/// Set the amount of the income row, creating the row first if needed.
///
/// # Errors
/// Returns [Error::SqlError] if a query fails.
pub fn update_monthly_income(amount: f64, connection: &Connection) -> Result<MonthlyIncome, Error> {
    let transaction = connection.unchecked_transaction()?;

    let income = get_monthly_income(&transaction)?;
    transaction.execute(
        "UPDATE monthly_income SET amount = ?1, updated_at = ?2 WHERE id = ?3",
        params![amount, OffsetDateTime::now_utc(), income.id],
    )?;
    let income = select_monthly_income(income.id, &transaction)?;

    transaction.commit()?;

    Ok(income)
}

fn select_monthly_income(id: DatabaseId, connection: &Connection) -> Result<MonthlyIncome, Error> {
    connection
        .query_row(
            "SELECT id, amount, updated_at FROM monthly_income WHERE id = ?1",
            params![id],
            map_row_to_monthly_income,
        )
        .map_err(Error::from)
}
