//! Defines the core data model and database queries for expenses.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{AppState, Error, database_id::ExpenseId};

/// The format of [Expense::date].
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
/// The format of [Expense::time] when it is generated by the server.
pub(crate) const TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[hour]:[minute]:[second]");
/// The short format of [Expense::time] that the client's time inputs produce.
pub(crate) const SHORT_TIME_FORMAT: &[BorrowedFormatItem] = format_description!("[hour]:[minute]");

// ============================================================================
// MODELS
// ============================================================================

/// A single spending event on the trip.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The ID of the expense, assigned by the database.
    pub id: ExpenseId,
    /// How much was spent.
    pub amount: f64,
    /// What kind of expense this was, e.g. "Food".
    pub category: String,
    /// A finer grained kind of expense within `category`, e.g. "Lunch".
    pub sub_category: Option<String>,
    /// Free text describing what the money was spent on.
    pub purpose: Option<String>,
    /// The person who paid.
    pub spent_by: String,
    /// The date of the expense as `YYYY-MM-DD`.
    pub date: String,
    /// The time of the expense as `HH:MM` or `HH:MM:SS`.
    pub time: String,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(amount: f64, category: &str, spent_by: &str) -> ExpenseBuilder {
        ExpenseBuilder {
            amount,
            category: category.to_owned(),
            sub_category: None,
            purpose: None,
            spent_by: spent_by.to_owned(),
            date: None,
            time: None,
        }
    }
}

/// A builder for creating or overwriting [Expense] records.
///
/// The date and time are optional. When they are not set, [create_expense]
/// fills them in with the current local date and time.
#[derive(Debug, PartialEq, Clone)]
pub struct ExpenseBuilder {
    /// How much was spent.
    pub amount: f64,
    /// What kind of expense this was.
    pub category: String,
    /// A finer grained kind of expense within `category`.
    pub sub_category: Option<String>,
    /// Free text describing what the money was spent on.
    pub purpose: Option<String>,
    /// The person who paid.
    pub spent_by: String,
    /// The date of the expense as `YYYY-MM-DD`.
    pub date: Option<String>,
    /// The time of the expense as `HH:MM` or `HH:MM:SS`.
    pub time: Option<String>,
}

impl ExpenseBuilder {
    /// Set the sub-category for the expense.
    pub fn sub_category(mut self, sub_category: Option<&str>) -> Self {
        self.sub_category = sub_category.map(str::to_owned);
        self
    }

    /// Set the purpose for the expense.
    pub fn purpose(mut self, purpose: Option<&str>) -> Self {
        self.purpose = purpose.map(str::to_owned);
        self
    }

    /// Set the date for the expense, formatted as `YYYY-MM-DD`.
    pub fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_owned());
        self
    }

    /// Set the time for the expense, formatted as `HH:MM` or `HH:MM:SS`.
    pub fn time(mut self, time: &str) -> Self {
        self.time = Some(time.to_owned());
        self
    }
}

/// The state needed to read and modify existing expenses.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The number of rows changed by an update or delete.
pub type RowsAffected = usize;

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database from a builder.
///
/// A missing date or time is set from `now`, which should be the current
/// time in the local timezone.
///
/// # Errors
/// This function will return a [Error::SqlError] if the row could not be inserted.
pub fn create_expense(
    builder: ExpenseBuilder,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<Expense, Error> {
    let date = match builder.date {
        Some(date) => date,
        None => format_now(now, DATE_FORMAT)?,
    };
    let time = match builder.time {
        Some(time) => time,
        None => format_now(now, TIME_FORMAT)?,
    };

    let expense = connection
        .prepare(
            "INSERT INTO expense (amount, category, sub_category, purpose, spent_by, date, time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, amount, category, sub_category, purpose, spent_by, date, time",
        )?
        .query_row(
            params![
                builder.amount,
                builder.category,
                builder.sub_category,
                builder.purpose,
                builder.spent_by,
                date,
                time,
            ],
            map_expense_row,
        )?;

    Ok(expense)
}

fn format_now(now: OffsetDateTime, format: &[BorrowedFormatItem]) -> Result<String, Error> {
    now.format(format).map_err(|error| {
        tracing::error!("could not format the current date-time {now}: {error}");
        Error::InvalidDate(now.to_string())
    })
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, amount, category, sub_category, purpose, spent_by, date, time
             FROM expense WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Get every expense, newest date first.
///
/// Expenses on the same date are ordered by ID, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    query_expenses(
        "SELECT id, amount, category, sub_category, purpose, spent_by, date, time
         FROM expense ORDER BY date DESC, id DESC",
        connection,
    )
}

/// Get every expense for exporting, ordered by date and then time, both newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_expenses_for_export(connection: &Connection) -> Result<Vec<Expense>, Error> {
    query_expenses(
        "SELECT id, amount, category, sub_category, purpose, spent_by, date, time
         FROM expense ORDER BY date DESC, time DESC",
        connection,
    )
}

fn query_expenses(query: &str, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(query)?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// Overwrite the fields of the expense with `id`.
///
/// A date or time that is not set on `expense` keeps its stored value.
/// Returns the number of rows updated, zero if `id` does not exist.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn update_expense(
    id: ExpenseId,
    expense: &ExpenseBuilder,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE expense
            SET \
                amount = ?1, \
                category = ?2, \
                sub_category = ?3, \
                purpose = ?4, \
                spent_by = ?5, \
                date = COALESCE(?6, date), \
                time = COALESCE(?7, time) \
            WHERE id = ?8;",
            params![
                expense.amount,
                expense.category,
                expense.sub_category,
                expense.purpose,
                expense.spent_by,
                expense.date,
                expense.time,
                id,
            ],
        )
        .map_err(Error::from)
}

/// Delete the expense with `id`.
///
/// Returns the number of rows deleted, zero if `id` does not exist.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                sub_category TEXT,
                purpose TEXT,
                spent_by TEXT NOT NULL,
                date TEXT NOT NULL DEFAULT (date('now')),
                time TEXT NOT NULL DEFAULT (time('now'))
                )",
        (),
    )?;

    // Used by the history and export orderings.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date_time ON expense(date, time);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        sub_category: row.get(3)?,
        purpose: row.get(4)?,
        spent_by: row.get(5)?,
        date: row.get(6)?,
        time: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
