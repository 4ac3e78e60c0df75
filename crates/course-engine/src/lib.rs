//! # course-engine
//!
//! Course catalog, calendar projection and session conflict detection.
//!
//! Courses are loaded from column-named tables into a read-only [`Catalog`]. A selection of
//! course ids is turned into flat [`CalendarEvent`]s, and every pair of selected courses is
//! checked for sessions that overlap in wall-clock time on the same date or weekday.
//!
//! Two scheduling shapes are supported side by side: sessions on explicit dates, and weekly
//! blocks (a weekday set with one time range) declared on the course row itself.
//!
//! ## Modules
//!
//! - [`table`] — Column-named tabular input, with CSV adapters
//! - [`catalog`] — Validated course/session records and their sorted views
//! - [`overlap`] — Pairwise session conflict detection
//! - [`projector`] — Selected courses → calendar events
//! - [`scheduler`] — Facade combining the above over a catalog snapshot
//! - [`time`] — Time, date and weekday parsing
//! - [`model`] — Course and session types
//! - [`error`] — Error types

pub mod catalog;
pub mod error;
pub mod model;
pub mod overlap;
pub mod projector;
pub mod scheduler;
pub mod table;
pub mod time;

pub use catalog::{Catalog, LoadReport, ALL_PROGRAMS, DEFAULT_PROGRAMS};
pub use error::{ErrorKind, ScheduleError};
pub use model::{Course, OccurrencePattern, Session};
pub use overlap::{find_conflicts, find_overlaps, sessions_conflict, ConflictInstance, Overlap};
pub use projector::{project, CalendarEvent};
pub use scheduler::{Schedule, Scheduler};
pub use table::Table;
