//! Database setup for the application's SQLite store.

use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table, income::create_monthly_income_table};

/// Create all of the application's tables if they do not already exist.
///
/// This is called on startup; there is no migration framework.
///
/// # Errors
/// Returns an error if any of the `CREATE TABLE` statements fail.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    create_expense_table(&transaction)?;
    create_monthly_income_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Acquire the database connection for the duration of a request.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned.
pub fn lock_connection(
    db_connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}
