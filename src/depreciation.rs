//! Depreciation window of an asset.
//!
//! Every asset expires three years after purchase. The number of calendar
//! months left until then decides how loudly the report flags it.

use chrono::{Datelike, Months, NaiveDate};
use colored::Colorize;

/// Length of the depreciation window.
pub const LIFETIME_MONTHS: u32 = 36;

/// Rows at or below this many months remaining are urgent.
pub const URGENT_MONTHS: i32 = 3;

/// Rows at or below this many months remaining carry a warning.
pub const WARNING_MONTHS: i32 = 6;

/// Purchase date plus three years.
///
/// A day that does not exist in the target month clamps to that month's last
/// day, so 2020-02-29 expires on 2023-02-28. Returns `None` only when the
/// result is outside chrono's supported range.
pub fn expiry_date(purchase_date: NaiveDate) -> Option<NaiveDate> {
    purchase_date.checked_add_months(Months::new(LIFETIME_MONTHS))
}

/// Whole calendar months from `today` until `expiry`, ignoring the day of
/// month. Negative once the expiry month has passed.
pub fn months_remaining(expiry: NaiveDate, today: NaiveDate) -> i32 {
    (expiry.year() - today.year()) * 12 + expiry.month() as i32 - today.month() as i32
}

/// Visual weight of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Emphasis {
    Normal,
    Warning,
    Urgent,
}

impl Emphasis {
    pub fn from_months_remaining(months: i32) -> Self {
        if months <= URGENT_MONTHS {
            Emphasis::Urgent
        } else if months <= WARNING_MONTHS {
            Emphasis::Warning
        } else {
            Emphasis::Normal
        }
    }

    /// Paints a rendered line: red for urgent, yellow for warning, untouched
    /// otherwise.
    pub fn paint(self, line: &str) -> String {
        match self {
            Emphasis::Urgent => line.red().to_string(),
            Emphasis::Warning => line.yellow().to_string(),
            Emphasis::Normal => line.to_string(),
        }
    }
}
