//! Project selected courses onto flat calendar events.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::ScheduleError;
use crate::model::{Course, Session};

/// A display-ready record of one course occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    /// The course id.
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub location: String,
    pub program: String,
    /// The session date exactly as loaded; absent for weekly sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Weekday name, computed from the parsed date for dated sessions.
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

impl CalendarEvent {
    pub fn new(course: &Course, session: &Session) -> Self {
        Self {
            id: course.course_id.clone(),
            title: course.title(),
            instructor: course.instructor.clone(),
            location: course.location.clone(),
            program: course.program.clone(),
            date: session.occurrence.date_text().map(str::to_string),
            day: session.day_name().to_string(),
            start_time: session.start_time.clone(),
            end_time: session.end_time.clone(),
        }
    }
}

/// Build one event per session of every selected course, in catalog session order.
///
/// Sessions pointing at a course the catalog does not hold are skipped.
pub fn project<S: AsRef<str>>(catalog: &Catalog, selected_ids: &[S]) -> Vec<CalendarEvent> {
    let selected: HashSet<&str> = selected_ids.iter().map(|id| id.as_ref()).collect();

    for id in &selected {
        if catalog.course(id).is_none() {
            debug!(course_id = %id, "selected course not in catalog");
        }
    }

    catalog
        .sessions()
        .iter()
        .filter(|s| selected.contains(s.course_id.as_str()))
        .filter_map(|s| match catalog.course(&s.course_id) {
            Some(course) => Some(CalendarEvent::new(course, s)),
            None => {
                let fault = ScheduleError::UnknownCourse(s.course_id.clone());
                warn!(error = %fault, "skipping session");
                None
            }
        })
        .collect()
}
