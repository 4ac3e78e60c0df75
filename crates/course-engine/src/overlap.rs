//! Detect time conflicts between selected courses.
//!
//! Performs pairwise comparison between the sessions of every pair of selected courses.
//! Adjacent sessions (where one ends exactly when another starts) are NOT conflicts.

use chrono::Weekday;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::model::{Course, OccurrencePattern, Session};
use crate::time::weekday_name;

/// The time range of one side of a conflict, as written in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
}

impl From<&Session> for TimeRange {
    fn from(s: &Session) -> Self {
        Self {
            start_time: s.start_time.clone(),
            end_time: s.end_time.clone(),
        }
    }
}

/// One pair of sessions that intersect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictInstance {
    /// The shared date, verbatim. Absent when both sessions are weekly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// The shared weekday name.
    pub day: String,
    pub session1: TimeRange,
    pub session2: TimeRange,
    pub overlap_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    TimeOverlap,
}

/// Evidence that two courses collide at least once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlap {
    pub course1: Course,
    pub course2: Course,
    pub conflict_type: ConflictType,
    pub conflicts: Vec<ConflictInstance>,
}

/// Test a single pair of sessions.
///
/// The sessions must fall on the same occasion: equal dates, equal weekdays, or a date
/// that lands on the other side's weekday. Their times must then satisfy
/// `a.start < b.end && b.start < a.end`.
pub fn sessions_conflict(a: &Session, b: &Session) -> Option<ConflictInstance> {
    use OccurrencePattern::{ExplicitDate, WeeklyRecurrence};

    let (date, day): (Option<&str>, Weekday) = match (&a.occurrence, &b.occurrence) {
        (ExplicitDate { date: da, text }, ExplicitDate { date: db, .. }) => {
            if da != db {
                return None;
            }
            (Some(text.as_str()), a.occurrence.weekday())
        }
        (ExplicitDate { text, .. }, WeeklyRecurrence(day))
        | (WeeklyRecurrence(day), ExplicitDate { text, .. }) => {
            if a.occurrence.weekday() != b.occurrence.weekday() {
                return None;
            }
            (Some(text.as_str()), *day)
        }
        (WeeklyRecurrence(da), WeeklyRecurrence(db)) => {
            if da != db {
                return None;
            }
            (None, *da)
        }
    };

    // Strict overlap: touching endpoints do not count.
    if !(a.start < b.end && b.start < a.end) {
        return None;
    }

    let overlap_minutes = (a.end.min(b.end) - a.start.max(b.start)).num_minutes();
    Some(ConflictInstance {
        date: date.map(str::to_string),
        day: weekday_name(day).to_string(),
        session1: TimeRange::from(a),
        session2: TimeRange::from(b),
        overlap_minutes,
    })
}

/// Find all conflicting session pairs between two session lists.
pub fn find_conflicts(sessions_a: &[&Session], sessions_b: &[&Session]) -> Vec<ConflictInstance> {
    let mut conflicts = Vec::new();

    for a in sessions_a {
        for b in sessions_b {
            if let Some(conflict) = sessions_conflict(a, b) {
                conflicts.push(conflict);
            }
        }
    }

    conflicts
}

/// Find every pair of selected courses with at least one conflicting session pair.
///
/// Pairs are visited as `(i, j)` with `i < j` in the order given. A single course never
/// conflicts with itself.
pub fn find_overlaps(catalog: &Catalog, selected: &[&Course]) -> Vec<Overlap> {
    let sessions: Vec<Vec<&Session>> = selected
        .iter()
        .map(|c| catalog.sessions_for(&c.course_id))
        .collect();

    let mut overlaps = Vec::new();
    for i in 0..selected.len() {
        for j in (i + 1)..selected.len() {
            let conflicts = find_conflicts(&sessions[i], &sessions[j]);
            if !conflicts.is_empty() {
                overlaps.push(Overlap {
                    course1: selected[i].clone(),
                    course2: selected[j].clone(),
                    conflict_type: ConflictType::TimeOverlap,
                    conflicts,
                });
            }
        }
    }

    overlaps
}
