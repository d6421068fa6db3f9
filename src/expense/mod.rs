//! Expense management for the trip.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and `ExpenseBuilder` for creating expenses
//! - Database functions for storing, querying, and managing expenses
//! - The JSON API handlers and the CSV export

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod export_endpoint;
mod list_endpoint;
mod request;

pub use core::{Expense, ExpenseBuilder, ExpenseState, create_expense, create_expense_table};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use export_endpoint::export_expenses_endpoint;
pub use list_endpoint::get_expenses_endpoint;
pub use request::{CreatedResponse, DeletedResponse, ExpenseRequest, UpdatedResponse};

#[cfg(test)]
pub use core::{count_expenses, delete_expense, get_all_expenses, get_expense, update_expense};
