//! Error types for course-engine operations.

use thiserror::Error;

/// Which input table a load error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Courses,
    Sessions,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Courses => f.write_str("course"),
            TableKind::Sessions => f.write_str("session"),
        }
    }
}

/// Broad category of a [`ScheduleError`]. None of them is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source data is missing or structurally unusable. Callers fall back to an
    /// empty catalog.
    DataLoad,
    /// One value failed to parse or validate. Only the offending row is dropped.
    ParseWarning,
    /// A record references a course id that the catalog does not hold.
    ReferenceFault,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Missing required column '{column}' in {table} table")]
    MissingColumn { table: TableKind, column: String },

    #[error("Data source error: {0}")]
    Source(String),

    #[error("Invalid time: '{0}'")]
    InvalidTime(String),

    #[error("Invalid date: '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid weekday: '{0}'")]
    InvalidWeekday(String),

    #[error("Invalid time range {start}-{end}: start must be before end")]
    InvalidTimeRange { start: String, end: String },

    #[error("Empty course_id")]
    EmptyCourseId,

    #[error("Duplicate course_id: {0}")]
    DuplicateCourse(String),

    #[error("Unknown course_id: {0}")]
    UnknownCourse(String),
}

impl ScheduleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::MissingColumn { .. } | ScheduleError::Source(_) => ErrorKind::DataLoad,
            ScheduleError::UnknownCourse(_) => ErrorKind::ReferenceFault,
            _ => ErrorKind::ParseWarning,
        }
    }
}

impl From<csv::Error> for ScheduleError {
    fn from(err: csv::Error) -> Self {
        ScheduleError::Source(err.to_string())
    }
}

impl From<std::io::Error> for ScheduleError {
    fn from(err: std::io::Error) -> Self {
        ScheduleError::Source(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
