//! Typed course and session records.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Serialize, Serializer};

use crate::time::weekday_name;

/// A course offering and its descriptive metadata.
///
/// Sessions are not owned by the course; the catalog links them through `course_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub course_id: String,
    pub course_name: String,
    pub instructor: String,
    pub location: String,
    pub program: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<f64>,
    /// Weekdays of the recurring block, empty for date-scheduled courses.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_weekdays"
    )]
    pub days: Vec<Weekday>,
    /// Recurring block start, as written in the course table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// Recurring block end, as written in the course table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl Course {
    /// Display title used on calendar events: `"CS101: Intro to Programming"`.
    pub fn title(&self) -> String {
        format!("{}: {}", self.course_id, self.course_name)
    }
}

fn serialize_weekdays<S: Serializer>(days: &[Weekday], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(days.iter().map(|d| weekday_name(*d)))
}

/// When a session happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccurrencePattern {
    /// A single calendar date. `text` is the date exactly as it appeared in the input.
    ExplicitDate { date: NaiveDate, text: String },
    /// Every week on the given weekday, with no date bounds.
    WeeklyRecurrence(Weekday),
}

impl OccurrencePattern {
    pub fn weekday(&self) -> Weekday {
        match self {
            OccurrencePattern::ExplicitDate { date, .. } => date.weekday(),
            OccurrencePattern::WeeklyRecurrence(day) => *day,
        }
    }

    /// The verbatim input date, for dated occurrences.
    pub fn date_text(&self) -> Option<&str> {
        match self {
            OccurrencePattern::ExplicitDate { text, .. } => Some(text),
            OccurrencePattern::WeeklyRecurrence(_) => None,
        }
    }
}

/// One timed occurrence of a course.
///
/// `start < end` holds for every session held by a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub course_id: String,
    pub occurrence: OccurrencePattern,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// Start time as written in the input.
    pub start_time: String,
    /// End time as written in the input.
    pub end_time: String,
}

impl Session {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn day_name(&self) -> &'static str {
        weekday_name(self.occurrence.weekday())
    }
}
