//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    expense::{CreatedResponse, ExpenseRequest, core::create_expense},
    timezone::get_local_offset,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for creating a new expense, responds with the new expense's ID.
///
/// A missing date or time defaults to the current date or time in the local timezone.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> Result<Json<CreatedResponse>, Error> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("rejected create expense body: {rejection}");
        Error::InvalidRequestBody(rejection.body_text())
    })?;

    let builder = request
        .validate()
        .inspect_err(|error| tracing::warn!("rejected create expense request: {error}"))?;

    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Err(Error::InvalidTimezone(state.local_timezone));
    };
    let now = OffsetDateTime::now_utc().to_offset(local_offset);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLock)?;

    let expense = create_expense(builder, now, &connection)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;

    tracing::info!("created expense {}", expense.id);

    Ok(Json(CreatedResponse { id: expense.id }))
}
