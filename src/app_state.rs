//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::http::HeaderValue;
use rusqlite::Connection;

use crate::{Error, db::initialize, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The single origin that is allowed to make cross-origin requests.
    pub frontend_origin: HeaderValue,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    /// `frontend_origin` is the origin of the frontend, e.g. "http://localhost:3000".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized, the timezone is
    /// not recognised, or the origin is not a valid header value.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        frontend_origin: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        let frontend_origin = HeaderValue::from_str(frontend_origin)
            .map_err(|_| Error::InvalidOrigin(frontend_origin.to_owned()))?;

        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            frontend_origin,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
