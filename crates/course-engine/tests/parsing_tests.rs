//! Tests for time/date/weekday parsing and CSV table input.

use chrono::{NaiveDate, NaiveTime, Weekday};
use course_engine::error::{ErrorKind, TableKind};
use course_engine::time::{parse_date, parse_days, parse_time, parse_weekday, weekday_name};
use course_engine::{Catalog, ScheduleError, Table};

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Times
// ---------------------------------------------------------------------------

#[test]
fn parses_24_hour_times() {
    assert_eq!(parse_time("09:00").unwrap(), hm(9, 0));
    assert_eq!(parse_time("9:05").unwrap(), hm(9, 5));
    assert_eq!(parse_time("23:59").unwrap(), hm(23, 59));
    assert_eq!(parse_time(" 14:30 ").unwrap(), hm(14, 30));
}

#[test]
fn parses_meridiem_times_in_any_case() {
    assert_eq!(parse_time("9:00 AM").unwrap(), hm(9, 0));
    assert_eq!(parse_time("2:30 PM").unwrap(), hm(14, 30));
    assert_eq!(parse_time("2:30pm").unwrap(), hm(14, 30));
    assert_eq!(parse_time("12:00 pm").unwrap(), hm(12, 0));
    assert_eq!(parse_time("12:15 AM").unwrap(), hm(0, 15));
}

#[test]
fn seconds_are_dropped() {
    assert_eq!(parse_time("10:30:45").unwrap(), hm(10, 30));
}

#[test]
fn malformed_times_are_parse_warnings() {
    for raw in ["", "nine", "25:00", "10:61", "13:00 PM", "2025-09-01"] {
        let err = parse_time(raw).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidTime(raw.to_string()), "input {raw:?}");
        assert_eq!(err.kind(), ErrorKind::ParseWarning);
    }
}

// ---------------------------------------------------------------------------
// Dates and weekdays
// ---------------------------------------------------------------------------

#[test]
fn parses_iso_dates_only() {
    assert_eq!(
        parse_date("2025-09-01").unwrap(),
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    );
    assert!(parse_date("09/01/2025").is_err());
    assert!(parse_date("2025-02-30").is_err());
}

#[test]
fn parses_weekday_names() {
    assert_eq!(parse_weekday("Monday").unwrap(), Weekday::Mon);
    assert_eq!(parse_weekday("tue").unwrap(), Weekday::Tue);
    assert_eq!(parse_weekday("THURSDAY").unwrap(), Weekday::Thu);
    assert!(parse_weekday("Funday").is_err());
}

#[test]
fn parses_day_lists_with_mixed_separators() {
    assert_eq!(
        parse_days("Monday,Wednesday,Friday").unwrap(),
        vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
    );
    assert_eq!(parse_days("Tue/Thu").unwrap(), vec![Weekday::Tue, Weekday::Thu]);
    assert_eq!(
        parse_days("Mon; Wed | Fri Mon").unwrap(),
        vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
    );
    assert!(parse_days("").unwrap().is_empty());
}

#[test]
fn weekday_names_are_full_english() {
    assert_eq!(weekday_name(Weekday::Mon), "Monday");
    assert_eq!(weekday_name(Weekday::Sun), "Sunday");
}

// ---------------------------------------------------------------------------
// CSV tables
// ---------------------------------------------------------------------------

#[test]
fn csv_reader_builds_a_table() {
    let csv = "course_id, course_name ,instructor,location,program\n\
               CS101,Intro to Programming,Dr. Smith,Room 101,Core Courses\n\
               MATH201,\"Calculus II, Honors\",Dr. Lee,Room 204,Core Courses\n";

    let table = Table::from_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(table.len(), 2);
    assert!(!table.is_empty());
    assert_eq!(table.column("course_name"), Some(1));

    let catalog = Catalog::load(&table, None).unwrap();
    assert_eq!(
        catalog.course("MATH201").unwrap().course_name,
        "Calculus II, Honors"
    );
}

#[test]
fn short_csv_rows_read_as_blank_cells() {
    let csv = "course_id,course_name,instructor,location,program\nCS101,Intro\n";

    let table = Table::from_csv_reader(csv.as_bytes()).unwrap();
    let catalog = Catalog::load(&table, None).unwrap();
    let course = catalog.course("CS101").unwrap();
    assert_eq!(course.instructor, "");
    assert_eq!(course.program, "");
}

#[test]
fn missing_csv_file_is_a_data_load_error() {
    let err = Table::from_csv_path("/nonexistent/courses_info.csv").unwrap_err();
    assert!(matches!(err, ScheduleError::Source(_)));
    assert_eq!(err.kind(), ErrorKind::DataLoad);
}

#[test]
fn require_reports_the_table_and_column() {
    let table = Table::from_slices(&["course_id"], &[]);
    assert!(table.is_empty());
    assert_eq!(table.require(TableKind::Sessions, "course_id").unwrap(), 0);
    assert_eq!(
        table.require(TableKind::Sessions, "date").unwrap_err().to_string(),
        "Missing required column 'date' in session table"
    );
}
