//! Spendlog is a web app for recording day-to-day expenses and reviewing
//! daily, weekly, and monthly totals.
//!
//! This library provides a server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod home;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    html::error_view, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as an expense category.
    #[error("category must not be empty")]
    EmptyCategory,

    /// The amount on the entry form was not a non-negative number.
    ///
    /// Callers should pass in the rejected form value.
    #[error("{0:?} is not a valid amount, expected a non-negative number")]
    InvalidAmount(String),

    /// The date on the entry form did not parse as `YYYY-MM-DD`.
    #[error("{0:?} is not a valid date in the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The time on the entry form did not parse as `HH:MM`.
    #[error("{0:?} is not a valid time in the format HH:MM")]
    InvalidTime(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::DeleteMissingExpense => get_404_not_found_response(),
            Error::EmptyCategory => bad_request_response(
                "Missing category",
                "Enter a category for the expense, e.g. \"Groceries\".",
            ),
            Error::InvalidAmount(_) => bad_request_response(
                "Invalid amount",
                "The amount must be a non-negative number, e.g. 12.50.",
            ),
            Error::InvalidDate(_) => bad_request_response(
                "Invalid date",
                "The date must be a calendar date in the format YYYY-MM-DD.",
            ),
            Error::InvalidTime(_) => bad_request_response(
                "Invalid time",
                "The time must be a wall-clock time in the format HH:MM.",
            ),
            Error::InvalidTimezoneError(timezone) => {
                tracing::error!("invalid timezone {timezone}");
                InternalServerError {
                    description: "Invalid Timezone Settings",
                    fix: "Check your server settings and ensure the timezone has \
                    been set to a valid, canonical timezone string.",
                }
                .into_response()
            }
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

fn bad_request_response(description: &str, fix: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Html(error_view("Bad Request", "400", description, fix).into_string()),
    )
        .into_response()
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn not_found_errors_render_404() {
        let cases = [Error::NotFound, Error::DeleteMissingExpense];

        for error in cases {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn validation_errors_render_400() {
        let cases = [
            Error::EmptyCategory,
            Error::InvalidAmount("abc".to_owned()),
            Error::InvalidDate("2024-13-01".to_owned()),
            Error::InvalidTime("25:00".to_owned()),
        ];

        for error in cases {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
