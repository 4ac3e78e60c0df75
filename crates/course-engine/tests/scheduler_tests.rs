//! Tests for the scheduler facade.

use std::sync::Arc;
use std::thread;

use course_engine::{Catalog, Schedule, Scheduler, Table, DEFAULT_PROGRAMS};

fn catalog() -> Catalog {
    let courses = Table::from_slices(
        &["course_id", "course_name", "instructor", "location", "program"],
        &[
            &["CS101", "Intro to Programming", "Dr. Smith", "Room 101", "Core Courses"],
            &["MATH201", "Calculus II", "Dr. Lee", "Room 204", "Core Courses"],
            &["ART210", "Drawing", "Ms. Gray", "Studio B", "Elective Courses"],
        ],
    );
    let sessions = Table::from_slices(
        &["course_id", "date", "start_time", "end_time"],
        &[
            &["CS101", "2025-09-01", "09:00", "10:30"],
            &["CS101", "2025-09-03", "09:00", "10:30"],
            &["MATH201", "2025-09-01", "10:00", "11:30"],
            &["MATH201", "2025-09-03", "10:30", "12:00"],
            &["ART210", "2025-09-02", "09:00", "12:00"],
        ],
    );
    Catalog::load(&courses, Some(&sessions)).unwrap()
}

#[test]
fn list_programs_and_courses() {
    let scheduler = Scheduler::new(catalog());

    assert_eq!(
        scheduler.list_programs(),
        vec!["Core Courses", "Elective Courses"]
    );
    let core: Vec<String> = scheduler
        .list_courses("Core Courses")
        .into_iter()
        .map(|c| c.course_id)
        .collect();
    assert_eq!(core, vec!["CS101", "MATH201"]);
    assert_eq!(scheduler.list_courses("All").len(), 3);
    assert!(scheduler.list_courses("Nonexistent").is_empty());
}

#[test]
fn schedule_reports_events_and_overlaps() {
    let scheduler = Scheduler::new(catalog());

    let schedule = scheduler.get_schedule(&["CS101", "MATH201", "ART210"]);

    assert_eq!(schedule.events.len(), 5);
    assert!(schedule.has_conflicts());
    assert_eq!(schedule.overlaps.len(), 1);
    let overlap = &schedule.overlaps[0];
    assert_eq!(overlap.course1.course_id, "CS101");
    assert_eq!(overlap.course2.course_id, "MATH201");
    // 09-03 only touches (10:30 end / 10:30 start), so only 09-01 conflicts.
    assert_eq!(overlap.conflicts.len(), 1);
    assert_eq!(overlap.conflicts[0].date.as_deref(), Some("2025-09-01"));
}

#[test]
fn single_selection_skips_overlap_detection() {
    let scheduler = Scheduler::new(catalog());

    let schedule = scheduler.get_schedule(&["CS101"]);
    assert_eq!(schedule.events.len(), 2);
    assert!(schedule.overlaps.is_empty());
}

#[test]
fn duplicate_ids_count_once() {
    let scheduler = Scheduler::new(catalog());

    let schedule = scheduler.get_schedule(&["CS101", "CS101"]);
    assert_eq!(schedule.events.len(), 2);
    assert!(schedule.overlaps.is_empty());
}

#[test]
fn overlap_pairs_follow_catalog_order_not_request_order() {
    let scheduler = Scheduler::new(catalog());

    let forward = scheduler.get_schedule(&["CS101", "MATH201"]);
    let reverse = scheduler.get_schedule(&["MATH201", "CS101"]);
    assert_eq!(forward, reverse);
}

#[test]
fn unknown_ids_yield_partial_results() {
    let scheduler = Scheduler::new(catalog());

    let schedule = scheduler.get_schedule(&["CS101", "NOPE"]);
    assert_eq!(schedule.events.len(), 2);
    assert!(schedule.overlaps.is_empty());
}

#[test]
fn empty_catalog_is_still_usable() {
    let scheduler = Scheduler::new(Catalog::empty());

    assert_eq!(scheduler.list_programs(), DEFAULT_PROGRAMS.to_vec());
    assert!(scheduler.list_courses("All").is_empty());
    assert_eq!(
        scheduler.get_schedule(&["CS101", "MATH201"]),
        Schedule::default()
    );
}

#[test]
fn reload_publishes_a_new_snapshot() {
    let scheduler = Scheduler::default();
    let before = scheduler.snapshot();
    assert!(before.is_empty());

    scheduler.reload(catalog());

    // The old snapshot is untouched; new calls see the new catalog.
    assert!(before.is_empty());
    assert_eq!(scheduler.snapshot().len(), 3);
    assert_eq!(scheduler.list_courses("All").len(), 3);
}

#[test]
fn concurrent_reads_share_one_catalog() {
    let scheduler = Arc::new(Scheduler::new(catalog()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let scheduler = Arc::clone(&scheduler);
            thread::spawn(move || scheduler.get_schedule(&["CS101", "MATH201"]))
        })
        .collect();

    for handle in handles {
        let schedule = handle.join().unwrap();
        assert_eq!(schedule.events.len(), 4);
        assert_eq!(schedule.overlaps.len(), 1);
    }
}

#[test]
fn schedule_serializes_as_events_and_overlaps() {
    let scheduler = Scheduler::new(catalog());

    let json = serde_json::to_value(scheduler.get_schedule(&["CS101", "MATH201"])).unwrap();
    assert!(json["events"].is_array());
    assert!(json["overlaps"].is_array());
    assert_eq!(json["events"][0]["id"], "CS101");
    assert_eq!(json["events"][0]["title"], "CS101: Intro to Programming");
    assert_eq!(json["events"][0]["day"], "Monday");
}
