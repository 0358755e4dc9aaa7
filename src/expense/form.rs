//! Typed parsing of the entry form.
//!
//! The form arrives as raw strings and is converted into a validated
//! [NewExpense] before it reaches the database.

use serde::Deserialize;
use time::{Date, Time, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

use super::core::NewExpense;

/// The raw form data submitted when recording an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The category the expense belongs to.
    pub category: String,
    /// The amount of money spent, in dollars.
    pub amount: String,
    /// The date when the expense occurred, in the format `YYYY-MM-DD`.
    pub date: String,
    /// The time when the expense occurred, in the format `HH:MM`.
    pub time: String,
}

pub const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month padding:zero]-[day padding:zero]");

pub const TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[hour padding:zero]:[minute padding:zero]");

impl TryFrom<ExpenseForm> for NewExpense {
    type Error = Error;

    fn try_from(form: ExpenseForm) -> Result<Self, Self::Error> {
        let category = form.category.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        let amount: f64 = form
            .amount
            .trim()
            .parse()
            .map_err(|_| Error::InvalidAmount(form.amount.clone()))?;

        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(form.amount));
        }

        let date = Date::parse(form.date.trim(), DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(form.date.clone()))?;

        let time = Time::parse(form.time.trim(), TIME_FORMAT)
            .map_err(|_| Error::InvalidTime(form.time.clone()))?;

        Ok(NewExpense {
            category: category.to_owned(),
            amount,
            date,
            time,
        })
    }
}
