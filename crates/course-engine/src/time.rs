//! Parsing of the wall-clock values found in course tables.
//!
//! All values are naive local time: no timezone is attached or inferred. Times are kept at
//! whole-minute precision.

use crate::error::{Result, ScheduleError};
use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};

/// Accepted time-of-day layouts, tried in order. Input is upper-cased first so the
/// meridiem matches regardless of case.
const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p", "%I:%M:%S %p"];

/// Parse a time of day such as `"09:00"`, `"9:00"`, `"14:30:00"` or `"2:30 PM"`.
///
/// Seconds are dropped.
///
/// # Errors
/// Returns `ScheduleError::InvalidTime` if no accepted layout matches.
pub fn parse_time(raw: &str) -> Result<NaiveTime> {
    let text = raw.trim().to_ascii_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&text, fmt).ok())
        .and_then(|t| NaiveTime::from_hms_opt(t.hour(), t.minute(), 0))
        .ok_or_else(|| ScheduleError::InvalidTime(raw.to_string()))
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(raw.to_string()))
}

/// Parse a single weekday name. Full (`"Monday"`) and short (`"Mon"`) names are accepted
/// in any case.
pub fn parse_weekday(raw: &str) -> Result<Weekday> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| ScheduleError::InvalidWeekday(raw.to_string()))
}

/// Parse a `days` cell such as `"Monday,Wednesday,Friday"` or `"Tue/Thu"`.
///
/// Separators may be commas, slashes, semicolons, pipes or whitespace. Repeated days are
/// kept once, in first-seen order. A blank cell yields an empty list.
pub fn parse_days(raw: &str) -> Result<Vec<Weekday>> {
    let mut days = Vec::new();
    for part in raw
        .split(|c: char| matches!(c, ',' | '/' | ';' | '|') || c.is_whitespace())
        .filter(|p| !p.is_empty())
    {
        let day = parse_weekday(part)?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

/// English display name of a weekday, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
