//! The facade callers use: programs, course lists and schedules over one catalog.
//!
//! The catalog is held as an immutable snapshot. [`Scheduler::reload`] swaps in a new
//! snapshot; calls already in flight keep the one they started with.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::model::Course;
use crate::overlap::{find_overlaps, Overlap};
use crate::projector::{project, CalendarEvent};

/// Calendar events and conflicts for one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    pub events: Vec<CalendarEvent>,
    pub overlaps: Vec<Overlap>,
}

impl Schedule {
    pub fn has_conflicts(&self) -> bool {
        !self.overlaps.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    catalog: RwLock<Arc<Catalog>>,
}

impl Scheduler {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The current catalog snapshot.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish a new catalog.
    pub fn reload(&self, catalog: Catalog) {
        let next = Arc::new(catalog);
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    pub fn list_programs(&self) -> Vec<String> {
        self.snapshot().programs()
    }

    /// Courses of `program`, or all courses for `"All"`.
    pub fn list_courses(&self, program: &str) -> Vec<Course> {
        self.snapshot()
            .courses_by_program(program)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Events for the selected courses, plus their pairwise conflicts.
    ///
    /// Duplicate ids count once. Conflicts are only computed when more than one course is
    /// selected.
    pub fn get_schedule<S: AsRef<str>>(&self, course_ids: &[S]) -> Schedule {
        let catalog = self.snapshot();

        let mut seen = HashSet::new();
        let ids: Vec<&str> = course_ids
            .iter()
            .map(|id| id.as_ref())
            .filter(|id| seen.insert(*id))
            .collect();

        let events = project(&catalog, &ids);

        let overlaps = if ids.len() > 1 {
            let selected: Vec<&Course> = catalog
                .all_courses()
                .into_iter()
                .filter(|c| seen.contains(c.course_id.as_str()))
                .collect();
            find_overlaps(&catalog, &selected)
        } else {
            Vec::new()
        };

        debug!(
            selected = ids.len(),
            events = events.len(),
            overlaps = overlaps.len(),
            "schedule computed"
        );
        Schedule { events, overlaps }
    }
}
