//! Date arithmetic panel
//!
//! Dates are plain calendar dates with no time zone. Inputs stay as text
//! until an action runs, mirroring the panel's date fields.

use chrono::{Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date panel errors; the message is what the results line shows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// A date field is not `YYYY-MM-DD`
    #[error("Please select valid dates")]
    InvalidDate(String),
    /// The day count has no leading integer
    #[error("Please enter a valid number of days")]
    InvalidDayCount(String),
    /// The result falls outside the supported calendar
    #[error("Date out of range")]
    OutOfRange,
}

/// Result type for date operations
pub type DateResult<T> = Result<T, DateError>;

const DATE_FORMAT: &str = "%Y-%m-%d";

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Date panel actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateAction {
    /// Whole days between start and end
    DaysBetween,
    /// Start plus the day count
    AddDays,
    /// Start minus the day count
    SubtractDays,
    /// Weekday name of start
    DayOfWeek,
    /// Week number of start
    WeekNumber,
}

impl DateAction {
    /// All actions in panel order
    pub const ALL: [Self; 5] = [
        Self::DaysBetween,
        Self::AddDays,
        Self::SubtractDays,
        Self::DayOfWeek,
        Self::WeekNumber,
    ];

    /// Action name used by panel buttons
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::DaysBetween => "days-between",
            Self::AddDays => "add-days",
            Self::SubtractDays => "subtract-days",
            Self::DayOfWeek => "day-of-week",
            Self::WeekNumber => "week-number",
        }
    }

    /// Looks an action up by name
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.action() == action)
    }
}

/// Parses a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> DateResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| DateError::InvalidDate(text.to_string()))
}

/// Formats a date as `YYYY-MM-DD`
#[must_use]
pub fn format_iso(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a date like `Wed Jan 10 2024`
#[must_use]
pub fn format_long(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Absolute number of whole days between two dates
#[must_use]
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days().abs()
}

/// Moves a date by `days`, forward for positive counts
pub fn add_days(date: NaiveDate, days: i64) -> DateResult<NaiveDate> {
    let step = Days::new(days.unsigned_abs());
    let moved = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    moved.ok_or(DateError::OutOfRange)
}

/// Moves a date back by `days`
pub fn subtract_days(date: NaiveDate, days: i64) -> DateResult<NaiveDate> {
    let negated = days.checked_neg().ok_or(DateError::OutOfRange)?;
    add_days(date, negated)
}

/// English weekday name
#[must_use]
pub fn day_of_week(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}

/// Week number as `ceil((days since Jan 1 + weekday of Jan 1 + 1) / 7)`
///
/// The weekday counts from Sunday = 0. This is not ISO 8601 numbering: the
/// first partial week is week 1 and weeks start on Sunday.
#[must_use]
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1 = date.with_ordinal(1).unwrap_or(date);
    let past_days = date.ordinal0();
    let offset = jan1.weekday().num_days_from_sunday();
    (past_days + offset + 1).div_ceil(7)
}

/// Parses a day count: the leading integer, blank meaning 0
///
/// `"12abc"` reads as 12 and `"2.5"` as 2; text with no leading integer is
/// rejected.
pub fn parse_day_count(text: &str) -> DateResult<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return Err(DateError::InvalidDayCount(text.to_string()));
    }
    trimmed[..sign_len + digits_len]
        .parse()
        .map_err(|_| DateError::InvalidDayCount(text.to_string()))
}

/// The date panel: start, end and day-count fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCalculator {
    /// Start date field
    pub start: String,
    /// End date field
    pub end: String,
    /// Day count field for add/subtract
    pub days: String,
}

impl Default for DateCalculator {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

impl DateCalculator {
    /// Panel with start = `today` and end = the day after
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let tomorrow = today.succ_opt().unwrap_or(today);
        Self {
            start: format_iso(today),
            end: format_iso(tomorrow),
            days: String::new(),
        }
    }

    /// Runs an action and returns the results line
    ///
    /// Both date fields must be valid, whichever action runs.
    #[must_use]
    pub fn run(&self, action: DateAction) -> String {
        self.try_run(action).unwrap_or_else(|err| err.to_string())
    }

    /// Runs an action, reporting failures as errors
    pub fn try_run(&self, action: DateAction) -> DateResult<String> {
        let start = parse_date(&self.start)?;
        let end = parse_date(&self.end)?;
        let line = match action {
            DateAction::DaysBetween => {
                format!("Days between: {} day(s)", days_between(start, end))
            }
            DateAction::AddDays => {
                let moved = add_days(start, parse_day_count(&self.days)?)?;
                format!("New date: {}", format_long(moved))
            }
            DateAction::SubtractDays => {
                let moved = subtract_days(start, parse_day_count(&self.days)?)?;
                format!("New date: {}", format_long(moved))
            }
            DateAction::DayOfWeek => format!("Day of week: {}", day_of_week(start)),
            DateAction::WeekNumber => format!("Week number: {}", week_number(start)),
        };
        Ok(line)
    }
}
