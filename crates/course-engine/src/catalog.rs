//! The course catalog: typed, validated course and session records loaded once from
//! tabular input and read-only afterwards.
//!
//! Rows that fail validation are quarantined (logged and recorded in the [`LoadReport`])
//! instead of aborting the load. Only a missing required column fails the whole load.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDateTime, NaiveTime};
use tracing::{debug, info, warn};

use crate::error::{Result, ScheduleError, TableKind};
use crate::model::{Course, OccurrencePattern, Session};
use crate::table::{Row, Table};
use crate::time::{parse_date, parse_days, parse_time};

/// Programs reported when the catalog holds no courses.
pub const DEFAULT_PROGRAMS: [&str; 3] = ["Core Courses", "Elective Courses", "Other Events"];

/// Program filter value that matches every course.
pub const ALL_PROGRAMS: &str = "All";

/// A row rejected during load.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarantinedRow {
    pub table: TableKind,
    /// 1-based data row number (the header row is not counted).
    pub row: usize,
    pub error: ScheduleError,
}

/// Summary of a catalog load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub courses_loaded: usize,
    pub sessions_loaded: usize,
    pub quarantined: Vec<QuarantinedRow>,
}

/// Ordering key for a course's earliest occurrence. Dated sessions sort first, then
/// weekday-only courses, then courses with nothing scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum StartKey {
    Dated(NaiveDateTime),
    Weekly(u32, NaiveTime),
    Unscheduled,
}

impl StartKey {
    fn of(session: &Session) -> Self {
        match &session.occurrence {
            OccurrencePattern::ExplicitDate { date, .. } => {
                StartKey::Dated(date.and_time(session.start))
            }
            OccurrencePattern::WeeklyRecurrence(day) => {
                StartKey::Weekly(day.num_days_from_monday(), session.start)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    sessions: Vec<Session>,
    index: HashMap<String, usize>,
    /// Course indices in earliest-session order.
    order: Vec<usize>,
    report: LoadReport,
}

impl Catalog {
    /// A catalog with no courses and no sessions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a catalog from a course table and an optional session table.
    ///
    /// Course rows carrying `days`, `start_time` and `end_time` are expanded into one
    /// weekly session per listed weekday.
    ///
    /// # Errors
    /// Returns `ScheduleError::MissingColumn` if either table lacks a required column.
    pub fn load(courses: &Table, sessions: Option<&Table>) -> Result<Self> {
        let course_cols = CourseColumns::locate(courses)?;
        let session_cols = sessions.map(SessionColumns::locate).transpose()?;

        let mut catalog = Catalog::default();

        for (i, row) in courses.rows().enumerate() {
            match course_cols.parse(&row) {
                Ok((course, block)) => catalog.insert_course(i + 1, course, block),
                Err(e) => catalog.quarantine(TableKind::Courses, i + 1, e),
            }
        }

        if let (Some(table), Some(cols)) = (sessions, session_cols) {
            for (i, row) in table.rows().enumerate() {
                match cols.parse(&row) {
                    Ok(session) => catalog.sessions.push(session),
                    Err(e) => catalog.quarantine(TableKind::Sessions, i + 1, e),
                }
            }
        }

        catalog.report.courses_loaded = catalog.courses.len();
        catalog.report.sessions_loaded = catalog.sessions.len();
        catalog.order = catalog.earliest_session_order();

        info!(
            course_rows = courses.len(),
            session_rows = sessions.map_or(0, Table::len),
            courses = catalog.report.courses_loaded,
            sessions = catalog.report.sessions_loaded,
            quarantined = catalog.report.quarantined.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Like [`Catalog::load`], but a load failure yields the empty catalog.
    pub fn load_or_empty(courses: &Table, sessions: Option<&Table>) -> Self {
        Self::load(courses, sessions).unwrap_or_else(|e| {
            warn!(error = %e, "catalog load failed, continuing with an empty catalog");
            Self::empty()
        })
    }

    fn insert_course(
        &mut self,
        row: usize,
        course: Course,
        block: Option<(NaiveTime, NaiveTime)>,
    ) {
        if self.index.contains_key(&course.course_id) {
            let id = course.course_id;
            self.quarantine(TableKind::Courses, row, ScheduleError::DuplicateCourse(id));
            return;
        }
        if let Some((start, end)) = block {
            for day in &course.days {
                self.sessions.push(Session {
                    course_id: course.course_id.clone(),
                    occurrence: OccurrencePattern::WeeklyRecurrence(*day),
                    start,
                    end,
                    start_time: course.start_time.clone().unwrap_or_default(),
                    end_time: course.end_time.clone().unwrap_or_default(),
                });
            }
        }
        self.index.insert(course.course_id.clone(), self.courses.len());
        self.courses.push(course);
    }

    fn quarantine(&mut self, table: TableKind, row: usize, error: ScheduleError) {
        warn!(%table, row, error = %error, "quarantined row");
        self.report.quarantined.push(QuarantinedRow { table, row, error });
    }

    fn earliest_session_order(&self) -> Vec<usize> {
        let mut earliest: HashMap<&str, StartKey> = HashMap::new();
        for session in &self.sessions {
            let key = StartKey::of(session);
            earliest
                .entry(session.course_id.as_str())
                .and_modify(|k| *k = (*k).min(key))
                .or_insert(key);
        }

        let mut order: Vec<usize> = (0..self.courses.len()).collect();
        // Stable: ties keep input order.
        order.sort_by_key(|&i| {
            earliest
                .get(self.courses[i].course_id.as_str())
                .copied()
                .unwrap_or(StartKey::Unscheduled)
        });
        order
    }

    /// All courses, earliest first session first.
    pub fn all_courses(&self) -> Vec<&Course> {
        self.order.iter().map(|&i| &self.courses[i]).collect()
    }

    /// Courses of one program, in [`Catalog::all_courses`] order. [`ALL_PROGRAMS`]
    /// disables the filter.
    pub fn courses_by_program(&self, program: &str) -> Vec<&Course> {
        if program == ALL_PROGRAMS {
            return self.all_courses();
        }
        self.order
            .iter()
            .map(|&i| &self.courses[i])
            .filter(|c| c.program == program)
            .collect()
    }

    /// Sorted, de-duplicated program names. Falls back to [`DEFAULT_PROGRAMS`] when the
    /// catalog holds no courses.
    pub fn programs(&self) -> Vec<String> {
        if self.courses.is_empty() {
            debug!("empty catalog, reporting default programs");
            return DEFAULT_PROGRAMS.iter().map(|p| p.to_string()).collect();
        }
        self.courses
            .iter()
            .map(|c| c.program.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.index.get(course_id).map(|&i| &self.courses[i])
    }

    pub fn sessions_for(&self, course_id: &str) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.course_id == course_id)
            .collect()
    }

    /// Every loaded session in input order, including sessions whose course is unknown.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

struct CourseColumns {
    course_id: usize,
    course_name: usize,
    instructor: usize,
    location: usize,
    program: usize,
    credits: Option<usize>,
    days: Option<usize>,
    start_time: Option<usize>,
    end_time: Option<usize>,
}

impl CourseColumns {
    fn locate(table: &Table) -> Result<Self> {
        let t = TableKind::Courses;
        Ok(Self {
            course_id: table.require(t, "course_id")?,
            course_name: table.require(t, "course_name")?,
            instructor: table.require(t, "instructor")?,
            location: table.require(t, "location")?,
            program: table.require(t, "program")?,
            credits: table.column("credits"),
            days: table.column("days"),
            start_time: table.column("start_time"),
            end_time: table.column("end_time"),
        })
    }

    /// Parse one course row, returning the weekly block's time range when the row
    /// carries weekdays and block times.
    fn parse(&self, row: &Row<'_>) -> Result<(Course, Option<(NaiveTime, NaiveTime)>)> {
        let course_id = row.get(self.course_id);
        if course_id.is_empty() {
            return Err(ScheduleError::EmptyCourseId);
        }

        let days = match row.get_opt(self.days) {
            Some(raw) => parse_days(raw)?,
            None => Vec::new(),
        };
        let start_time = row.get_opt(self.start_time);
        let end_time = row.get_opt(self.end_time);

        // Days without any block time are metadata only; the session table carries the times.
        let block = if days.is_empty() || (start_time.is_none() && end_time.is_none()) {
            None
        } else {
            let start = parse_time(start_time.unwrap_or_default())?;
            let end = parse_time(end_time.unwrap_or_default())?;
            if start >= end {
                return Err(ScheduleError::InvalidTimeRange {
                    start: start_time.unwrap_or_default().to_string(),
                    end: end_time.unwrap_or_default().to_string(),
                });
            }
            Some((start, end))
        };

        let credits = row.get_opt(self.credits).and_then(|raw| match raw.parse::<f64>() {
            Ok(c) => Some(c),
            Err(_) => {
                warn!(course_id, credits = raw, "ignoring unparseable credits");
                None
            }
        });

        let course = Course {
            course_id: course_id.to_string(),
            course_name: row.get(self.course_name).to_string(),
            instructor: row.get(self.instructor).to_string(),
            location: row.get(self.location).to_string(),
            program: row.get(self.program).to_string(),
            credits,
            days,
            start_time: start_time.map(str::to_string),
            end_time: end_time.map(str::to_string),
        };
        Ok((course, block))
    }
}

struct SessionColumns {
    course_id: usize,
    date: usize,
    start_time: usize,
    end_time: usize,
}

impl SessionColumns {
    fn locate(table: &Table) -> Result<Self> {
        let t = TableKind::Sessions;
        Ok(Self {
            course_id: table.require(t, "course_id")?,
            date: table.require(t, "date")?,
            start_time: table.require(t, "start_time")?,
            end_time: table.require(t, "end_time")?,
        })
    }

    fn parse(&self, row: &Row<'_>) -> Result<Session> {
        let course_id = row.get(self.course_id);
        if course_id.is_empty() {
            return Err(ScheduleError::EmptyCourseId);
        }
        let date_text = row.get(self.date);
        let start_time = row.get(self.start_time);
        let end_time = row.get(self.end_time);

        let date = parse_date(date_text)?;
        let start = parse_time(start_time)?;
        let end = parse_time(end_time)?;
        // Zero-length and inverted sessions are rejected.
        if start >= end {
            return Err(ScheduleError::InvalidTimeRange {
                start: start_time.to_string(),
                end: end_time.to_string(),
            });
        }

        Ok(Session {
            course_id: course_id.to_string(),
            occurrence: OccurrencePattern::ExplicitDate {
                date,
                text: date_text.to_string(),
            },
            start,
            end,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        })
    }
}
