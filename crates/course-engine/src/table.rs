//! Column-named tabular records.
//!
//! A [`Table`] is the shape in which course and session data reach the catalog: a header
//! row plus string cells. Column names are the contract; column order is not. The CSV
//! adapters here are the only place the engine touches a file format.

use std::io;
use std::path::Path;

use crate::error::{Result, ScheduleError, TableKind};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers.into_iter().map(|h| h.trim().to_string()).collect();
        Self { headers, rows }
    }

    /// Build a table from string slices. Handy for fixtures and tests.
    pub fn from_slices(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    /// Read a CSV document whose first record is the header row.
    ///
    /// Cells are trimmed. Rows may be shorter than the header; missing cells read as empty.
    ///
    /// # Errors
    /// Returns `ScheduleError::Source` if the reader fails or the CSV is malformed.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        Self::collect(&mut rdr)
    }

    /// Read a CSV file from disk. See [`Table::from_csv_reader`].
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;
        Self::collect(&mut rdr)
    }

    fn collect<R: io::Read>(rdr: &mut csv::Reader<R>) -> Result<Self> {
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self::new(headers, rows))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the named column, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of the named column, or `MissingColumn` if the table lacks it.
    pub fn require(&self, table: TableKind, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| ScheduleError::MissingColumn {
            table,
            column: name.to_string(),
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row { cells })
    }
}

/// One data row of a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Trimmed cell at `index`; empty when the row is short.
    pub fn get(&self, index: usize) -> &'a str {
        self.cells.get(index).map(|c| c.trim()).unwrap_or("")
    }

    /// Like [`Row::get`] for an optional column, with blank cells mapped to `None`.
    pub fn get_opt(&self, index: Option<usize>) -> Option<&'a str> {
        index.map(|i| self.get(i)).filter(|c| !c.is_empty())
    }
}
