//! `courses` CLI — browse a course catalog and check a selection for time conflicts.
//!
//! ## Usage
//!
//! ```sh
//! # List programs (JSON array)
//! courses programs
//!
//! # List courses of one program, or all of them
//! courses list --program "Core Courses"
//! courses list
//!
//! # Calendar events and conflicts for a selection (JSON)
//! courses schedule CS101 MATH201
//!
//! # Human-readable conflict check; exits with status 2 on conflicts
//! courses check CS101 MATH201
//!
//! # Point at other data files
//! courses --courses-file data/courses.csv --sessions-file data/sessions.csv list
//! courses --config courses.toml list
//! ```

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use course_engine::{Catalog, Schedule, Scheduler, Table, ALL_PROGRAMS};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, DataConfig, LoggingConfig};

/// Exit status of `check` when the selection has conflicts.
const EXIT_CONFLICTS: i32 = 2;

#[derive(Parser)]
#[command(
    name = "courses",
    version,
    about = "Course catalog browser and schedule conflict checker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Course table (CSV)
    #[arg(long, global = true, env = "COURSES_FILE")]
    courses_file: Option<PathBuf>,

    /// Session table (CSV)
    #[arg(long, global = true, env = "SESSIONS_FILE")]
    sessions_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "course_engine=debug" (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List program names
    Programs,
    /// List courses, optionally filtered by program
    List {
        /// Program name, or "All"
        #[arg(short, long, default_value = ALL_PROGRAMS)]
        program: String,
    },
    /// Calendar events and conflicts for the selected courses
    Schedule {
        /// Course ids
        #[arg(required = true)]
        courses: Vec<String>,
    },
    /// Summarize conflicts among the selected courses
    Check {
        /// Course ids
        #[arg(required = true)]
        courses: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.override_data(cli.courses_file.clone(), cli.sessions_file.clone());

    setup_tracing(&config.logging, cli.log_level.as_deref())?;

    let scheduler = Scheduler::new(load_catalog(&config.data));

    match cli.command {
        Commands::Programs => print_json(&scheduler.list_programs(), cli.compact)?,
        Commands::List { program } => print_json(&scheduler.list_courses(&program), cli.compact)?,
        Commands::Schedule { courses } => {
            print_json(&scheduler.get_schedule(&courses), cli.compact)?
        }
        Commands::Check { courses } => {
            let schedule = scheduler.get_schedule(&courses);
            print!("{}", conflict_report(&courses, &schedule));
            if schedule.has_conflicts() {
                io::stdout().flush().context("Failed to write to stdout")?;
                process::exit(EXIT_CONFLICTS);
            }
        }
    }

    Ok(())
}

/// Install the global subscriber. Logs go to stderr so stdout stays machine-readable.
///
/// Filter precedence: `--log-level`, then `RUST_LOG`, then the config file.
fn setup_tracing(logging: &LoggingConfig, log_level: Option<&str>) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level)),
    }
    .context("Invalid log filter")?;

    let ansi = io::stderr().is_terminal();
    if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(ansi)
                    .with_writer(io::stderr),
            )
            .init();
    }

    Ok(())
}

/// Load the catalog, falling back to an empty one when the course table is unavailable.
/// A missing session table just means no dated sessions.
fn load_catalog(data: &DataConfig) -> Catalog {
    let courses = match Table::from_csv_path(&data.courses_file) {
        Ok(table) => table,
        Err(e) => {
            warn!(
                path = %data.courses_file.display(),
                error = %e,
                "course data unavailable, continuing with an empty catalog"
            );
            return Catalog::empty();
        }
    };

    let sessions = match Table::from_csv_path(&data.sessions_file) {
        Ok(table) => Some(table),
        Err(e) => {
            warn!(
                path = %data.sessions_file.display(),
                error = %e,
                "session data unavailable, loading courses only"
            );
            None
        }
    };

    Catalog::load_or_empty(&courses, sessions.as_ref())
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json).context("Failed to write to stdout")?;
    Ok(())
}

fn conflict_report(selected: &[String], schedule: &Schedule) -> String {
    if !schedule.has_conflicts() {
        return format!(
            "No conflicts among {} selected course(s); {} event(s) scheduled.\n",
            selected.len(),
            schedule.events.len()
        );
    }

    let mut out = String::new();
    for overlap in &schedule.overlaps {
        out.push_str(&format!(
            "{} conflicts with {}:\n",
            overlap.course1.course_id, overlap.course2.course_id
        ));
        for c in &overlap.conflicts {
            let when = match &c.date {
                Some(date) => format!("{} ({})", date, c.day),
                None => format!("every {}", c.day),
            };
            out.push_str(&format!(
                "  {}: {}-{} vs {}-{} ({} min)\n",
                when,
                c.session1.start_time,
                c.session1.end_time,
                c.session2.start_time,
                c.session2.end_time,
                c.overlap_minutes
            ));
        }
    }
    out
}
