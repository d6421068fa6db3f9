//! Defines the endpoint for the spending totals.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    summary::{Summary, get_summary},
};

/// The state needed to compute the summary.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with the total spent, and the totals per category and per person.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
) -> Result<Json<Summary>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLock)?;

    let summary = get_summary(&connection)
        .inspect_err(|error| tracing::error!("could not compute summary: {error}"))?;

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        db::initialize,
        expense::{Expense, create_expense},
        summary::{SummaryState, get_summary_endpoint},
    };

    #[tokio::test]
    async fn responds_with_totals() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let now = datetime!(2026-03-14 09:15:00 UTC);
        create_expense(Expense::build(100.0, "Food", "Ramesh"), now, &connection).unwrap();
        create_expense(Expense::build(250.0, "Food", "Rajkumar"), now, &connection).unwrap();
        let state = SummaryState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let summary = get_summary_endpoint(State(state)).await.unwrap().0;

        assert_eq!(summary.total_spent, 350.0);
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].total, 350.0);
        assert_eq!(summary.by_person.len(), 2);
    }
}
