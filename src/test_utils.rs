use axum_test::TestServer;
use rusqlite::{Connection, params};
use time::{OffsetDateTime, UtcOffset};

use crate::{AppState, build_router, database_id::ExpenseId, initialize_db};

#[track_caller]
pub(crate) fn must_create_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize_db(&connection).expect("could not initialize test DB");

    connection
}

#[track_caller]
pub(crate) fn must_create_test_server() -> TestServer {
    let state = AppState::new(
        Connection::open_in_memory().expect("could not create in-memory SQLite database"),
        "Etc/UTC",
        "http://localhost:3000",
    )
    .expect("could not create app state");

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// Insert an expense with a fixed creation time, bypassing the server clock.
#[track_caller]
pub(crate) fn insert_expense_at(
    name: &str,
    amount: f64,
    category: &str,
    created_at: OffsetDateTime,
    connection: &Connection,
) -> ExpenseId {
    connection
        .execute(
            "INSERT INTO expense (name, amount, category, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![name, amount, category, created_at.to_offset(UtcOffset::UTC)],
        )
        .expect("could not insert test expense");

    connection.last_insert_rowid()
}
