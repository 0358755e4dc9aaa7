//! Defines the core data model and database functions for expenses.

use rusqlite::{Connection, Row};
use time::{Date, Time};

use crate::{
    Error,
    database_id::ExpenseId,
};

// ============================================================================
// MODELS
// ============================================================================

/// A single recorded expense, i.e. an event where money was spent.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The category the expense belongs to, e.g. "Groceries".
    pub category: String,
    /// The amount of money spent, in dollars.
    pub amount: f64,
    /// The calendar date when the expense occurred.
    pub date: Date,
    /// The wall-clock time when the expense occurred.
    ///
    /// Stored alongside the date but never combined with it. The windowed
    /// views filter on the date only.
    pub time: Time,
}

/// A validated expense that has not been stored yet.
///
/// Instances come from parsing the entry form, see
/// [ExpenseForm](crate::expense::form::ExpenseForm).
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The category the expense belongs to, e.g. "Groceries".
    pub category: String,
    /// The amount of money spent, in dollars. Non-negative.
    pub amount: f64,
    /// The calendar date when the expense occurred.
    pub date: Date,
    /// The wall-clock time when the expense occurred.
    pub time: Time,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expense (category, amount, date, time)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, category, amount, date, time",
        )?
        .query_one(
            (
                new_expense.category,
                new_expense.amount,
                new_expense.date,
                new_expense.time,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, category, amount, date, time FROM expense WHERE id = :id")?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Retrieve all expenses in the database, in no particular order.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, category, amount, date, time FROM expense")?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
        .collect()
}

/// The number of rows changed by a statement.
pub type RowsAffected = usize;

/// Delete the expense with `id` from the database.
///
/// Returns the number of rows deleted: 0 means there was no expense with
/// the given `id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // AUTOINCREMENT keeps deleted IDs from ever being reassigned.
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                time TEXT NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    // Index used by the windowed views.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let category = row.get(1)?;
    let amount = row.get(2)?;
    let date = row.get(3)?;
    let time = row.get(4)?;

    Ok(Expense {
        id,
        category,
        amount,
        date,
        time,
    })
}

// ============================================================================
// TESTS
// ============================================================================
