//! Defines the endpoint for listing every expense.

use axum::{Json, extract::State};

use crate::{
    Error,
    expense::{Expense, ExpenseState, core::get_all_expenses},
};

/// A route handler that responds with every expense as JSON, newest date first.
pub async fn get_expenses_endpoint(
    State(state): State<ExpenseState>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLock)?;

    let expenses = get_all_expenses(&connection)
        .inspect_err(|error| tracing::error!("could not list expenses: {error}"))?;

    Ok(Json(expenses))
}
