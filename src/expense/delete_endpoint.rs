//! Defines the endpoint for deleting an expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::Redirect,
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::ExpenseId, endpoints};

use super::core::delete_expense;

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense, redirects to the daily view on
/// success.
///
/// Responds with 404 if there is no expense with the given ID.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Redirect, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    match delete_expense(expense_id, &connection) {
        Ok(0) => Err(Error::DeleteMissingExpense),
        Ok(_) => {
            tracing::info!("deleted expense {expense_id}");
            Ok(Redirect::to(endpoints::DAILY_VIEW))
        }
        Err(error) => {
            tracing::error!("could not delete expense {expense_id}: {error}");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::{date, time};

    use crate::{
        Error,
        db::initialize,
        expense::core::{NewExpense, create_expense, get_expense},
    };

    use super::{DeleteExpenseState, delete_expense_endpoint};

    fn get_test_state() -> DeleteExpenseState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DeleteExpenseState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn deletes_expense_and_redirects_to_daily_view() {
        let state = get_test_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                NewExpense {
                    category: "Transport".to_owned(),
                    amount: 3.2,
                    date: date!(2024 - 06 - 05),
                    time: time!(08:15),
                },
                &connection,
            )
            .unwrap()
        };

        let redirect = delete_expense_endpoint(State(state.clone()), Path(expense.id))
            .await
            .unwrap();

        let response = redirect.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("location").unwrap();
        assert_eq!(location, "/view/daily");

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_expense(expense.id, &connection), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn responds_not_found_for_missing_expense() {
        let state = get_test_state();

        let result = delete_expense_endpoint(State(state), Path(42)).await;

        let error = result.expect_err("deleting a missing expense should fail");
        assert_eq!(error, Error::DeleteMissingExpense);
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
