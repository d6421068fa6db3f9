//! Defines the endpoint for deleting an expense.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{DeletedResponse, ExpenseState, core::delete_expense},
};

/// A route handler for deleting an expense, responds with the number of expenses deleted.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Json<DeletedResponse>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLock)?;

    let deleted = delete_expense(expense_id, &connection)
        .inspect_err(|error| tracing::error!("Could not delete expense {expense_id}: {error}"))?;

    Ok(Json(DeletedResponse { deleted }))
}
