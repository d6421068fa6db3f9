//! Defines the endpoint for downloading every expense as a CSV file.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use csv::{QuoteStyle, WriterBuilder};

use crate::{
    Error,
    expense::{Expense, ExpenseState, core::get_expenses_for_export},
};

/// The header row of the exported CSV file.
pub const CSV_HEADER: &str = "ID,Date,Time,Category,Sub-Category,Amount,Spent By,Purpose";

/// The name the browser saves the exported file as.
pub const EXPORT_FILE_NAME: &str = "trip_expenses.csv";

/// A route handler that responds with every expense as a CSV attachment.
///
/// Rows are ordered by date and then time, both newest first.
pub async fn export_expenses_endpoint(State(state): State<ExpenseState>) -> Response {
    let expenses = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLock.into_response();
            }
        };

        match get_expenses_for_export(&connection) {
            Ok(expenses) => expenses,
            Err(error) => {
                tracing::error!("could not get expenses for export: {error}");
                return error.into_response();
            }
        }
    };

    let csv = match write_expenses_csv(&expenses) {
        Ok(csv) => csv,
        Err(error) => return error.into_response(),
    };

    (
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={EXPORT_FILE_NAME}"),
            ),
        ],
        csv,
    )
        .into_response()
}

/// Write `expenses` as CSV text with a header row.
///
/// Every field that is not a number is quoted. Absent optional fields are
/// written as empty strings.
///
/// # Errors
/// Returns an [Error::CsvError] if the CSV writer fails.
pub fn write_expenses_csv(expenses: &[Expense]) -> Result<String, Error> {
    let mut buffer = format!("{CSV_HEADER}\n").into_bytes();

    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::NonNumeric)
            .from_writer(&mut buffer);

        for expense in expenses {
            writer
                .write_record([
                    expense.id.to_string().as_str(),
                    expense.date.as_str(),
                    expense.time.as_str(),
                    expense.category.as_str(),
                    expense.sub_category.as_deref().unwrap_or_default(),
                    expense.amount.to_string().as_str(),
                    expense.spent_by.as_str(),
                    expense.purpose.as_deref().unwrap_or_default(),
                ])
                .map_err(|error| {
                    tracing::error!("could not write expense {} as CSV: {error}", expense.id);
                    Error::CsvError(error.to_string())
                })?;
        }

        writer.flush().map_err(|error| {
            tracing::error!("could not flush CSV writer: {error}");
            Error::CsvError(error.to_string())
        })?;
    }

    String::from_utf8(buffer).map_err(|error| Error::CsvError(error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response};
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        initialize_db,
        expense::{Expense, ExpenseState, create_expense, export_expenses_endpoint},
        test_utils::{assert_content_type, assert_status_ok, get_header},
    };

    use super::{CSV_HEADER, write_expenses_csv};

    fn get_test_state() -> ExpenseState {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();

        ExpenseState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    async fn body_text(response: Response<Body>) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");

        String::from_utf8_lossy(&body).to_string()
    }

    #[test]
    fn empty_export_is_only_header() {
        let csv = write_expenses_csv(&[]).unwrap();

        assert_eq!(csv, format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn quotes_text_fields() {
        let expense = Expense {
            id: 1,
            amount: 500.0,
            category: "Food".to_owned(),
            sub_category: Some("Lunch".to_owned()),
            purpose: Some("Thali, extra rice".to_owned()),
            spent_by: "Rajkumar".to_owned(),
            date: "2026-03-14".to_owned(),
            time: "13:05:00".to_owned(),
        };

        let csv = write_expenses_csv(&[expense]).unwrap();

        assert_eq!(
            csv,
            format!(
                "{CSV_HEADER}\n\
                1,\"2026-03-14\",\"13:05:00\",\"Food\",\"Lunch\",500,\"Rajkumar\",\"Thali, extra rice\"\n"
            )
        );
    }

    #[test]
    fn absent_optional_fields_are_empty_quoted_strings() {
        let expense = Expense {
            id: 1,
            amount: 500.0,
            category: "Food".to_owned(),
            sub_category: None,
            purpose: None,
            spent_by: "Rajkumar".to_owned(),
            date: "2026-03-14".to_owned(),
            time: "13:05:00".to_owned(),
        };

        let csv = write_expenses_csv(&[expense]).unwrap();

        assert_eq!(
            csv,
            format!(
                "{CSV_HEADER}\n\
                1,\"2026-03-14\",\"13:05:00\",\"Food\",\"\",500,\"Rajkumar\",\"\"\n"
            )
        );
    }

    #[tokio::test]
    async fn export_has_one_row_per_expense() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let now = datetime!(2026-03-14 09:15:00 UTC);
            create_expense(Expense::build(500.0, "Food", "Rajkumar"), now, &connection).unwrap();
            create_expense(
                Expense::build(300.5, "Transport", "Ramesh").date("2026-03-15"),
                now,
                &connection,
            )
            .unwrap();
        }

        let response = export_expenses_endpoint(State(state)).await;

        assert_status_ok(&response);
        assert_content_type(&response, "text/csv; charset=utf-8");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=trip_expenses.csv"
        );
        let text = body_text(response).await;
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3, "want header and two rows, got {lines:?}");
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with("2,\"2026-03-15\""), "got {}", lines[1]);
        assert!(lines[1].contains(",300.5,\"Ramesh\""), "got {}", lines[1]);
        assert!(lines[2].starts_with("1,\"2026-03-14\",\"09:15:00\",\"Food\""));
    }
}
