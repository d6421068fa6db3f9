//! Aggregation queries for the summary.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::Error;

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The sum of the amounts of the expenses in `category`.
    pub total: f64,
}

/// The total spent by one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonTotal {
    /// The person who paid.
    pub spent_by: String,
    /// The sum of the amounts of the expenses paid by `spent_by`.
    pub total: f64,
}

/// The totals computed over every expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of every expense, zero if there are none.
    pub total_spent: f64,
    /// One entry per category, largest total first.
    pub by_category: Vec<CategoryTotal>,
    /// One entry per person, largest total first.
    pub by_person: Vec<PersonTotal>,
}

/// Compute the summary from the expenses currently in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_summary(connection: &Connection) -> Result<Summary, Error> {
    Ok(Summary {
        by_category: get_totals_by_category(connection)?,
        by_person: get_totals_by_person(connection)?,
        total_spent: get_total_spent(connection)?,
    })
}

/// Get the sum over every expense, or zero if there are no expenses.
pub fn get_total_spent(connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row("SELECT COALESCE(SUM(amount), 0.0) FROM expense", [], |row| {
            row.get(0)
        })
        .map_err(Error::from)
}

/// Get the sum of the expenses in each category, largest first.
pub fn get_totals_by_category(connection: &Connection) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT category, SUM(amount) AS total FROM expense
             GROUP BY category ORDER BY total DESC, category ASC",
        )?
        .query_map([], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(Error::from))
        .collect()
}

/// Get the sum of the expenses paid by each person, largest first.
pub fn get_totals_by_person(connection: &Connection) -> Result<Vec<PersonTotal>, Error> {
    connection
        .prepare(
            "SELECT spent_by, SUM(amount) AS total FROM expense
             GROUP BY spent_by ORDER BY total DESC, spent_by ASC",
        )?
        .query_map([], |row| {
            Ok(PersonTotal {
                spent_by: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(Error::from))
        .collect()
}
