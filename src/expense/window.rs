//! Windowed date-range helpers for the expense views.

use time::{Date, Duration, Month};

/// The aggregation windows offered by the expense views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Today only.
    Daily,
    /// The ISO week (Monday through Sunday) containing today.
    Weekly,
    /// The calendar month containing today.
    Monthly,
}

impl Window {
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

/// Compute the date range for `window` anchored at the reference date `today`.
pub fn compute_window(window: Window, today: Date) -> DateRange {
    match window {
        Window::Daily => DateRange {
            start: today,
            end: today,
        },
        Window::Weekly => week_bounds(today),
        Window::Monthly => month_bounds(today),
    }
}

fn week_bounds(today: Date) -> DateRange {
    let weekday_number = today.weekday().number_from_monday() as i64;
    let start = today - Duration::days(weekday_number - 1);
    let end = start + Duration::days(6);

    DateRange { start, end }
}

fn month_bounds(today: Date) -> DateRange {
    let start = today.replace_day(1).expect("day 1 exists in every month");

    // Day 28 exists in every month and day 28 plus 4 days always lands in
    // the next month, so the last day of this month is the day before the
    // next month's first day.
    let into_next_month =
        today.replace_day(28).expect("day 28 exists in every month") + Duration::days(4);
    let end = into_next_month
        .replace_day(1)
        .expect("day 1 exists in every month")
        - Duration::days(1);

    DateRange { start, end }
}

pub fn window_range_label(range: DateRange) -> String {
    let start = format_date_label(range.start);
    let end = format_date_label(range.end);

    format!("{start} - {end}")
}

fn format_date_label(date: Date) -> String {
    format!(
        "{} {} {}",
        date.day(),
        month_abbrev(date.month()),
        date.year()
    )
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod window_tests {
    use time::{Weekday, macros::date};

    use super::{DateRange, Window, compute_window, window_range_label};

    #[test]
    fn daily_window_is_the_reference_date() {
        let today = date!(2024 - 06 - 05);

        let range = compute_window(Window::Daily, today);

        assert_eq!(range.start, today);
        assert_eq!(range.end, today);
    }

    #[test]
    fn weekly_window_spans_monday_to_sunday() {
        // 2024-06-05 is a Wednesday.
        let range = compute_window(Window::Weekly, date!(2024 - 06 - 05));

        assert_eq!(range.start, date!(2024 - 06 - 03));
        assert_eq!(range.end, date!(2024 - 06 - 09));
        assert_eq!(range.start.weekday(), Weekday::Monday);
        assert_eq!(range.end.weekday(), Weekday::Sunday);
    }

    #[test]
    fn weekly_window_is_stable_across_the_week() {
        let monday = date!(2024 - 06 - 03);
        let sunday = date!(2024 - 06 - 09);

        for today in [monday, date!(2024 - 06 - 06), sunday] {
            let range = compute_window(Window::Weekly, today);

            assert_eq!(range.start, monday, "reference date {today}");
            assert_eq!(range.end, sunday, "reference date {today}");
        }
    }

    #[test]
    fn weekly_window_crosses_month_boundary() {
        // 2024-07-01 is a Monday; the preceding Sunday is in June.
        let range = compute_window(Window::Weekly, date!(2024 - 06 - 30));

        assert_eq!(range.start, date!(2024 - 06 - 24));
        assert_eq!(range.end, date!(2024 - 06 - 30));
    }

    #[test]
    fn monthly_window_covers_the_calendar_month() {
        let range = compute_window(Window::Monthly, date!(2024 - 06 - 15));

        assert_eq!(range.start, date!(2024 - 06 - 01));
        assert_eq!(range.end, date!(2024 - 06 - 30));
    }

    #[test]
    fn monthly_window_handles_leap_year_february() {
        let range = compute_window(Window::Monthly, date!(2024 - 02 - 15));

        assert_eq!(range.start, date!(2024 - 02 - 01));
        assert_eq!(range.end, date!(2024 - 02 - 29));
    }

    #[test]
    fn monthly_window_handles_non_leap_year_february() {
        let range = compute_window(Window::Monthly, date!(2025 - 02 - 28));

        assert_eq!(range.start, date!(2025 - 02 - 01));
        assert_eq!(range.end, date!(2025 - 02 - 28));
    }

    #[test]
    fn monthly_window_handles_december() {
        let range = compute_window(Window::Monthly, date!(2025 - 12 - 10));

        assert_eq!(range.start, date!(2025 - 12 - 01));
        assert_eq!(range.end, date!(2025 - 12 - 31));
    }

    #[test]
    fn labels_range_with_day_month_year() {
        let range = DateRange {
            start: date!(2024 - 06 - 03),
            end: date!(2024 - 06 - 09),
        };

        assert_eq!(window_range_label(range), "3 Jun 2024 - 9 Jun 2024");
    }
}
