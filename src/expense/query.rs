//! Database queries and aggregation for the windowed expense views.

use rusqlite::Connection;

use crate::Error;

use super::{
    core::{Expense, map_expense_row},
    window::DateRange,
};

/// The expenses that fall within a window and the sum of their amounts.
#[derive(Debug, PartialEq)]
pub struct ExpenseSummary {
    /// The expenses whose date falls within the window.
    pub expenses: Vec<Expense>,
    /// The sum of the amounts of `expenses`. Zero if the window is empty.
    pub total: f64,
}

/// Retrieve the expenses whose date falls within `range`, inclusive on both
/// bounds.
///
/// The comparison uses the expense date only. The time of day never affects
/// which expenses fall within a range.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_expenses_in_range(
    range: DateRange,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, category, amount, date, time FROM expense
             WHERE date BETWEEN :start AND :end
             ORDER BY date, id",
        )?
        .query_map(
            &[(":start", &range.start), (":end", &range.end)],
            map_expense_row,
        )?
        .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
        .collect()
}

/// Compute the windowed slice of expenses and their total.
///
/// An empty window is a valid result with a total of zero, not an error.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_expense_summary(
    range: DateRange,
    connection: &Connection,
) -> Result<ExpenseSummary, Error> {
    let expenses = get_expenses_in_range(range, connection)?;
    let total = expenses.iter().map(|expense| expense.amount).sum();

    Ok(ExpenseSummary { expenses, total })
}

#[cfg(test)]
mod query_tests {
    use rusqlite::Connection;
    use time::{
        Date,
        macros::{date, time},
    };

    use crate::{
        db::initialize,
        expense::{
            core::{NewExpense, create_expense},
            window::{DateRange, Window, compute_window},
        },
    };

    use super::{get_expense_summary, get_expenses_in_range};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert_expense(conn: &Connection, amount: f64, date: Date) {
        create_expense(
            NewExpense {
                category: "Misc".to_owned(),
                amount,
                date,
                time: time!(12:00),
            },
            conn,
        )
        .unwrap();
    }

    #[test]
    fn weekly_summary_includes_only_expenses_in_the_week() {
        let conn = get_test_connection();
        insert_expense(&conn, 10.0, date!(2024 - 06 - 03));
        insert_expense(&conn, 20.0, date!(2024 - 06 - 09));
        insert_expense(&conn, 5.0, date!(2024 - 06 - 10));

        // 2024-06-05 is a Wednesday.
        let range = compute_window(Window::Weekly, date!(2024 - 06 - 05));
        let summary = get_expense_summary(range, &conn).unwrap();

        assert_eq!(
            range,
            DateRange {
                start: date!(2024 - 06 - 03),
                end: date!(2024 - 06 - 09),
            }
        );
        assert_eq!(summary.expenses.len(), 2);
        assert_eq!(summary.total, 30.0);
    }

    #[test]
    fn range_filter_is_inclusive_on_both_bounds() {
        let conn = get_test_connection();
        insert_expense(&conn, 1.0, date!(2024 - 06 - 02));
        insert_expense(&conn, 2.0, date!(2024 - 06 - 03));
        insert_expense(&conn, 4.0, date!(2024 - 06 - 09));
        insert_expense(&conn, 8.0, date!(2024 - 06 - 10));

        let range = DateRange {
            start: date!(2024 - 06 - 03),
            end: date!(2024 - 06 - 09),
        };
        let expenses = get_expenses_in_range(range, &conn).unwrap();

        let amounts: Vec<f64> = expenses.iter().map(|expense| expense.amount).collect();
        assert_eq!(amounts, vec![2.0, 4.0]);
    }

    #[test]
    fn time_of_day_does_not_affect_filtering() {
        let conn = get_test_connection();
        create_expense(
            NewExpense {
                category: "Late snack".to_owned(),
                amount: 3.5,
                date: date!(2024 - 06 - 09),
                time: time!(23:59),
            },
            &conn,
        )
        .unwrap();

        let range = DateRange {
            start: date!(2024 - 06 - 03),
            end: date!(2024 - 06 - 09),
        };
        let summary = get_expense_summary(range, &conn).unwrap();

        assert_eq!(summary.expenses.len(), 1);
        assert_eq!(summary.total, 3.5);
    }

    #[test]
    fn empty_range_has_zero_total() {
        let conn = get_test_connection();
        insert_expense(&conn, 10.0, date!(2024 - 06 - 10));

        let range = compute_window(Window::Daily, date!(2024 - 06 - 05));
        let summary = get_expense_summary(range, &conn).unwrap();

        assert_eq!(summary.expenses, vec![]);
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn total_is_the_sum_of_amounts_in_range() {
        let conn = get_test_connection();
        insert_expense(&conn, 1.25, date!(2024 - 06 - 01));
        insert_expense(&conn, 2.5, date!(2024 - 06 - 15));
        insert_expense(&conn, 10.0, date!(2024 - 06 - 30));
        insert_expense(&conn, 100.0, date!(2024 - 07 - 01));

        let range = compute_window(Window::Monthly, date!(2024 - 06 - 15));
        let summary = get_expense_summary(range, &conn).unwrap();

        assert_eq!(summary.expenses.len(), 3);
        assert_eq!(summary.total, 13.75);
    }
}
