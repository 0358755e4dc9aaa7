//! Defines the endpoint for recording a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Redirect,
};
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{AppState, Error, endpoints};

use super::{
    core::{NewExpense, create_expense},
    form::ExpenseForm,
};

/// The state needed to record an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for recording a new expense, redirects to the home page
/// on success.
///
/// The raw form fields are validated before the expense reaches the
/// database: the date must be `YYYY-MM-DD`, the time `HH:MM`, and the
/// amount a non-negative number. Malformed input responds with 400.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Form(form): Form<ExpenseForm>,
) -> Result<Redirect, Error> {
    let new_expense = NewExpense::try_from(form)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let expense = create_expense(new_expense, &connection)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;

    tracing::info!(
        "recorded expense {} of {} in category {:?}",
        expense.id,
        expense.amount,
        expense.category
    );

    Ok(Redirect::to(endpoints::ROOT))
}
