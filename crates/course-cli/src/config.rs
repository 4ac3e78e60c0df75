//! Configuration for the `courses` CLI.
//!
//! Loaded from an optional TOML file; every field has a default. Command-line flags (and
//! their environment variables) are applied on top by `main`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

/// Where the catalog tables live.
///
/// Relative paths read from a config file are resolved against the file's directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Course table (CSV)
    pub courses_file: PathBuf,
    /// Session table (CSV); optional for weekday-only catalogs
    pub sessions_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            courses_file: PathBuf::from("courses_info.csv"),
            sessions_file: PathBuf::from("course_sessions.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. "warn" or "course_engine=debug"
    pub level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
            json: false,
        }
    }
}

impl DataConfig {
    fn resolve_relative_to(&mut self, dir: &Path) {
        self.courses_file = dir.join(&self.courses_file);
        self.sessions_file = dir.join(&self.sessions_file);
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.data.resolve_relative_to(dir);
        }
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replace the data paths with any that were given on the command line.
    pub fn override_data(&mut self, courses_file: Option<PathBuf>, sessions_file: Option<PathBuf>) {
        if let Some(path) = courses_file {
            self.data.courses_file = path;
        }
        if let Some(path) = sessions_file {
            self.data.sessions_file = path;
        }
    }
}
