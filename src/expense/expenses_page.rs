//! Defines the route handlers for the daily, weekly, and monthly expense
//! views.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::OffsetDateTime;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    timezone::get_local_offset,
};

use super::{
    core::Expense,
    query::{ExpenseSummary, get_expense_summary},
    window::{DateRange, Window, compute_window, window_range_label},
};

/// The max number of graphemes to display in the category column before
/// truncating and displaying ellipses.
const MAX_CATEGORY_GRAPHEMES: usize = 32;

/// The state needed for the windowed expense views.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection for querying expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Renders today's expenses and their total.
pub async fn get_daily_expenses_page(
    State(state): State<ExpensesPageState>,
) -> Result<Response, Error> {
    get_expenses_page(state, Window::Daily)
}

/// Renders this week's expenses and their total.
pub async fn get_weekly_expenses_page(
    State(state): State<ExpensesPageState>,
) -> Result<Response, Error> {
    get_expenses_page(state, Window::Weekly)
}

/// Renders this month's expenses and their total.
pub async fn get_monthly_expenses_page(
    State(state): State<ExpensesPageState>,
) -> Result<Response, Error> {
    get_expenses_page(state, Window::Monthly)
}

fn get_expenses_page(state: ExpensesPageState, window: Window) -> Result<Response, Error> {
    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();
    let range = compute_window(window, today);

    let summary = {
        let connection = state.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        get_expense_summary(range, &connection)
            .inspect_err(|error| tracing::error!("could not query expenses: {error}"))?
    };

    Ok(expenses_view(window, range, &summary).into_response())
}

fn active_endpoint(window: Window) -> &'static str {
    match window {
        Window::Daily => endpoints::DAILY_VIEW,
        Window::Weekly => endpoints::WEEKLY_VIEW,
        Window::Monthly => endpoints::MONTHLY_VIEW,
    }
}

fn expenses_view(window: Window, range: DateRange, summary: &ExpenseSummary) -> Markup {
    let nav_bar = NavBar::new(active_endpoint(window)).into_html();
    let title = format!("{} Expenses", window.label());

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { (title) }

                    span class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        (window_range_label(range))
                    }
                }

                section class="rounded bg-gray-50 dark:bg-gray-800 overflow-hidden lg:max-w-5xl lg:w-full lg:mx-auto"
                {
                    table class="w-full my-2 text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Category"
                                }
                                th scope="col" class="px-6 py-3 text-right"
                                {
                                    "Amount"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Date"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Time"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Actions"
                                }
                            }
                        }

                        tbody
                        {
                            @for expense in &summary.expenses {
                                (expense_row_view(expense))
                            }

                            @if summary.expenses.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        data-empty-state="true"
                                        class="px-6 py-4 text-center"
                                    {
                                        "No expenses in this range."
                                    }
                                }
                            }
                        }

                        tfoot
                        {
                            tr class="font-semibold text-gray-900 dark:text-white"
                            {
                                th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                                td class="px-6 py-4 text-right" data-total="true"
                                {
                                    (format_currency(summary.total))
                                }
                                td colspan="3" class=(TABLE_CELL_STYLE) {}
                            }
                        }
                    }
                }
            }
        }
    };

    base(&title, &[], &content)
}

fn expense_row_view(expense: &Expense) -> Markup {
    let (category, tooltip) = format_category(&expense.category);
    let delete_url = format_endpoint(endpoints::DELETE_EXPENSE, expense.id);
    let time_str = format!("{:02}:{:02}", expense.time.hour(), expense.time.minute());

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-row="true"
        {
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (category) }
            td class="px-6 py-4 text-right" { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE) { time datetime=(expense.date) { (expense.date) } }
            td class=(TABLE_CELL_STYLE) { (time_str) }
            td class=(TABLE_CELL_STYLE)
            {
                a
                    href=(delete_url)
                    class=(BUTTON_DELETE_STYLE)
                    onclick="return confirm('Are you sure you want to delete this expense? This cannot be undone.')"
                {
                    "Delete"
                }
            }
        }
    }
}

fn format_category(category: &str) -> (String, Option<&str>) {
    let category_length = category.graphemes(true).count();

    if category_length <= MAX_CATEGORY_GRAPHEMES {
        (category.to_owned(), None)
    } else {
        let truncated: String = category
            .graphemes(true)
            .take(MAX_CATEGORY_GRAPHEMES - 3)
            .collect();
        let truncated = truncated + "...";
        (truncated, Some(category))
    }
}
