//! Defines the endpoint for overwriting an existing expense.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{ExpenseRequest, ExpenseState, UpdatedResponse, core::update_expense},
};

/// A route handler for updating an expense, responds with the number of expenses updated.
///
/// Updating an expense that does not exist is not an error, the response
/// reports zero updated expenses instead.
pub async fn edit_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> Result<Json<UpdatedResponse>, Error> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("rejected update expense body: {rejection}");
        Error::InvalidRequestBody(rejection.body_text())
    })?;

    let builder = request.validate().inspect_err(|error| {
        tracing::warn!("rejected update request for expense {expense_id}: {error}")
    })?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLock)?;

    let updated = update_expense(expense_id, &builder, &connection)
        .inspect_err(|error| tracing::error!("Could not update expense {expense_id}: {error}"))?;

    if updated == 0 {
        tracing::warn!("Tried to update expense {expense_id} which does not exist");
    }

    Ok(Json(UpdatedResponse { updated }))
}
