//! Core data model types for profiling.
//!
//! This crate ingests CSV input into an in-memory [`Dataset`] of raw string
//! cells and derives per-column profiles from it. Cells stay untyped on
//! purpose: classifying them as numeric or categorical is the profiler's job,
//! not ingestion's.

use crate::error::{ProfilerError, ProfilerResult};

/// A single cell in a [`Dataset`].
///
/// `None` means the field was absent from the source row. An empty string is
/// *also* treated as missing by the profiler; see [`is_missing`].
pub type Cell = Option<String>;

/// Returns `true` if a cell counts as missing: absent or the empty string.
pub fn is_missing(cell: &Cell) -> bool {
    match cell {
        None => true,
        Some(v) => v.is_empty(),
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored row-major in the same order as [`Dataset::column_names`].
/// Construction normalizes ragged input: rows shorter than the header are
/// padded with missing cells, rows longer than the header are truncated.
/// The row count is fixed once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    column_names: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Create a dataset from header-derived column names and raw rows.
    ///
    /// Rows are padded/truncated to the column count. Returns
    /// [`ProfilerError::InvalidInput`] if rows are present but the column
    /// set is empty, since such rows cannot be addressed by name.
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<Cell>>) -> ProfilerResult<Self> {
        if column_names.is_empty() && !rows.is_empty() {
            return Err(ProfilerError::InvalidInput {
                message: format!(
                    "dataset has {} row(s) but no columns to assign them to",
                    rows.len()
                ),
            });
        }

        let width = column_names.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                while row.len() < width {
                    row.push(None);
                }
                row
            })
            .collect();

        Ok(Self { column_names, rows })
    }

    /// A dataset with no columns and no rows (e.g. an empty upload).
    pub fn empty() -> Self {
        Self {
            column_names: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// Column names in header order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// The cell at `(row, col)`, or `None` if either index is out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterate rows in order. Every row slice has [`Self::column_count`]
    /// cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// The first `k` rows, for bounded display.
    pub fn preview(&self, k: usize) -> &[Vec<Cell>] {
        let end = k.min(self.rows.len());
        &self.rows[..end]
    }
}
