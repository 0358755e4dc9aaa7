//! Expense records for the expense tracker.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and database functions for storing and deleting records
//! - Date-window computation and the aggregation queries behind the views
//! - Route handlers for the entry form and the windowed views

mod core;
mod create_endpoint;
mod delete_endpoint;
mod expenses_page;
mod form;
mod new_expense_page;
mod query;
mod window;

pub use core::{Expense, create_expense_table};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::delete_expense_endpoint;
pub use expenses_page::{
    get_daily_expenses_page, get_monthly_expenses_page, get_weekly_expenses_page,
};
pub use new_expense_page::get_new_expense_page;
