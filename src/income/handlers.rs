//! Route handlers for reading and setting the monthly income.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::lock_connection,
    income::core::{IncomeForm, MonthlyIncome, get_monthly_income, update_monthly_income},
};

/// The state needed for the monthly income endpoints.
#[derive(Debug, Clone)]
pub struct IncomeState {
    /// The database connection for managing the income row.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for IncomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Get the monthly income, creating the default if none has been set.
pub async fn get_monthly_income_endpoint(
    State(state): State<IncomeState>,
) -> Result<Json<MonthlyIncome>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_monthly_income(&connection).map(Json)
}

/// Set the monthly income amount.
pub async fn update_monthly_income_endpoint(
    State(state): State<IncomeState>,
    Json(form): Json<IncomeForm>,
) -> Result<Json<MonthlyIncome>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    update_monthly_income(form.amount, &connection)
        .inspect(|income| tracing::info!("Monthly income set to {}", income.amount))
        .map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};

    use crate::{
        income::core::{DEFAULT_MONTHLY_INCOME, IncomeForm},
        test_utils::must_create_test_connection,
    };

    use super::{IncomeState, get_monthly_income_endpoint, update_monthly_income_endpoint};

    fn must_create_state() -> IncomeState {
        IncomeState {
            db_connection: Arc::new(Mutex::new(must_create_test_connection())),
        }
    }

    #[tokio::test]
    async fn get_returns_default() {
        let state = must_create_state();

        let Json(income) = get_monthly_income_endpoint(State(state)).await.unwrap();

        assert_eq!(income.amount, DEFAULT_MONTHLY_INCOME);
    }

    #[tokio::test]
    async fn put_then_get_returns_new_amount() {
        let state = must_create_state();

        update_monthly_income_endpoint(State(state.clone()), Json(IncomeForm { amount: 5000.0 }))
            .await
            .unwrap();
        let Json(income) = get_monthly_income_endpoint(State(state)).await.unwrap();

        assert_eq!(income.amount, 5000.0);
    }
}
