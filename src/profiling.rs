//! Dataset profiling: per-column type inference, null detection, and summary
//! statistics.
//!
//! [`profile`] is a pure function of its input: it never mutates the dataset,
//! has no side effects, and is fully deterministic. Missing values and mixed
//! types are handled data conditions, not errors, so profiling cannot fail.
//!
//! Two behaviors are deliberate quirks carried over from the contract this
//! profiler implements, kept rather than "fixed":
//!
//! - A numeric column with zero non-missing cells reports `mean`/`min`/`max`
//!   of `0.0` instead of omitting them.
//! - [`CategoricalSummary::most_common`] is the *first-seen* category, not
//!   the true mode; no frequency counting happens.
//!
//! # Example
//!
//! ```
//! use csv_profiler::ingestion::{CsvOptions, ingest_csv_from_bytes};
//! use csv_profiler::profiling::{ColumnKind, profile};
//!
//! # fn main() -> Result<(), csv_profiler::ProfilerError> {
//! let ds = ingest_csv_from_bytes(b"age,city\n34,Berlin\n28,\n,Lagos\n", &CsvOptions::default())?;
//! let prof = profile(&ds);
//!
//! assert_eq!(prof.row_count, 3);
//! assert_eq!(prof.columns[0].kind, ColumnKind::Numeric);
//! assert_eq!(prof.columns[0].null_count, 1);
//! assert_eq!(prof.columns[1].kind, ColumnKind::Categorical);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Dataset};

/// Default number of rows carried in [`DatasetProfile::preview`].
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Default cap on distinct categories tracked per column.
///
/// Bounds memory on adversarial inputs (e.g. an ID column with millions of
/// unique values). When the cap is hit, the category set stops growing and
/// [`CategoricalSummary::truncated`] is set.
pub const DEFAULT_MAX_DISTINCT_CATEGORIES: usize = 1000;

/// Inferred column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every non-missing cell converts losslessly to a float.
    Numeric,
    /// At least one non-missing cell does not convert. A single such cell
    /// anywhere forces the whole column categorical; there is no
    /// majority rule.
    Categorical,
}

/// Summary statistics for a numeric column, computed over non-missing cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Arithmetic mean; `0.0` when the column has no non-missing cells.
    pub mean: f64,
    /// Minimum; `0.0` when the column has no non-missing cells.
    pub min: f64,
    /// Maximum; `0.0` when the column has no non-missing cells.
    pub max: f64,
    /// Number of non-missing cells the statistics were computed over.
    pub non_missing: usize,
}

/// Summary for a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Distinct raw values in first-seen order, bounded by
    /// [`ProfileOptions::max_distinct_categories`].
    pub distinct_categories: Vec<String>,
    /// The first category encountered. This is a documented stand-in for
    /// the modal value; frequencies are not counted. `None` only when the
    /// category cap is zero.
    pub most_common: Option<String>,
    /// `true` if the category cap was hit and the set is incomplete.
    pub truncated: bool,
}

/// Profile of a single column. Exactly one of `numeric`/`categorical` is
/// populated, matching `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name from the header.
    pub name: String,
    /// Inferred type.
    pub kind: ColumnKind,
    /// Number of missing cells (absent or empty string).
    pub null_count: usize,
    /// Numeric statistics, present iff `kind` is [`ColumnKind::Numeric`].
    pub numeric: Option<NumericSummary>,
    /// Category data, present iff `kind` is [`ColumnKind::Categorical`].
    pub categorical: Option<CategoricalSummary>,
}

/// The full profiling result for one dataset.
///
/// Derived fresh on every [`profile`] call and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Number of data rows.
    pub row_count: usize,
    /// Number of header-derived columns.
    pub column_count: usize,
    /// One profile per column, in header order.
    pub columns: Vec<ColumnProfile>,
    /// The first [`ProfileOptions::preview_rows`] rows, for display.
    pub preview: Vec<Vec<Cell>>,
}

/// Options controlling profiling behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOptions {
    /// Rows carried in [`DatasetProfile::preview`].
    pub preview_rows: usize,
    /// Cap on distinct categories tracked per column.
    pub max_distinct_categories: usize,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            max_distinct_categories: DEFAULT_MAX_DISTINCT_CATEGORIES,
        }
    }
}

/// Profile a dataset with default options.
///
/// A zero-row dataset is legitimate input and yields a profile with no
/// column data rather than an error.
pub fn profile(dataset: &Dataset) -> DatasetProfile {
    profile_with_options(dataset, &ProfileOptions::default())
}

/// Profile a dataset, controlling preview size and the category cap.
///
/// Single pass over the rows; every column keeps its own accumulator, so
/// memory is proportional to the dataset plus the per-column category cap.
pub fn profile_with_options(dataset: &Dataset, options: &ProfileOptions) -> DatasetProfile {
    let mut accumulators: Vec<ColumnAccumulator> = dataset
        .column_names()
        .iter()
        .map(|_| ColumnAccumulator::new())
        .collect();

    for row in dataset.rows() {
        for (acc, cell) in accumulators.iter_mut().zip(row) {
            acc.observe(cell, options.max_distinct_categories);
        }
    }

    let columns = accumulators
        .into_iter()
        .zip(dataset.column_names())
        .map(|(acc, name)| acc.finish(name))
        .collect();

    DatasetProfile {
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        columns,
        preview: dataset.preview(options.preview_rows).to_vec(),
    }
}

/// Locale-free numeric conversion: standard float parse on the trimmed
/// value. All-whitespace and non-numeric strings fail.
fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Per-column working aggregates for one profiling pass.
struct ColumnAccumulator {
    null_count: usize,
    is_numeric: bool,
    sum: f64,
    numeric_count: usize,
    min: f64,
    max: f64,
    categories: Vec<String>,
    seen: HashSet<String>,
    truncated: bool,
}

impl ColumnAccumulator {
    fn new() -> Self {
        Self {
            null_count: 0,
            is_numeric: true,
            sum: 0.0,
            numeric_count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            categories: Vec::new(),
            seen: HashSet::new(),
            truncated: false,
        }
    }

    fn observe(&mut self, cell: &Cell, category_cap: usize) {
        let raw = match cell {
            None => {
                self.null_count += 1;
                return;
            }
            Some(v) if v.is_empty() => {
                self.null_count += 1;
                return;
            }
            Some(v) => v.as_str(),
        };

        match parse_numeric(raw) {
            Some(v) => {
                self.sum += v;
                self.numeric_count += 1;
                self.min = self.min.min(v);
                self.max = self.max.max(v);
            }
            None => self.is_numeric = false,
        }

        // Categories are tracked regardless of the running numeric verdict,
        // so a column that only turns categorical on a late row still has
        // complete category data.
        if !self.seen.contains(raw) {
            if self.categories.len() < category_cap {
                self.seen.insert(raw.to_string());
                self.categories.push(raw.to_string());
            } else {
                self.truncated = true;
            }
        }
    }

    fn finish(self, name: &str) -> ColumnProfile {
        // `is_numeric` still set covers two cases: unanimous numeric
        // conversion, and a column with zero non-missing cells. The latter
        // is classified numeric with zero-defaulted statistics.
        if self.is_numeric {
            let has_values = self.numeric_count > 0;
            ColumnProfile {
                name: name.to_string(),
                kind: ColumnKind::Numeric,
                null_count: self.null_count,
                numeric: Some(NumericSummary {
                    mean: if has_values {
                        self.sum / self.numeric_count as f64
                    } else {
                        0.0
                    },
                    min: if has_values { self.min } else { 0.0 },
                    max: if has_values { self.max } else { 0.0 },
                    non_missing: self.numeric_count,
                }),
                categorical: None,
            }
        } else {
            ColumnProfile {
                name: name.to_string(),
                kind: ColumnKind::Categorical,
                null_count: self.null_count,
                numeric: None,
                categorical: Some(CategoricalSummary {
                    most_common: self.categories.first().cloned(),
                    distinct_categories: self.categories,
                    truncated: self.truncated,
                }),
            }
        }
    }
}

// ── Boundary report ──────────────────────────────────────────────────────

/// The serialized shape a boundary layer (HTTP handler, CLI) hands back for
/// one profiling request.
///
/// Maps keyed by column name use [`BTreeMap`] so the JSON output is
/// deterministic; `string_columns`/`numeric_columns` keep header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Missing-cell count per column.
    pub null_columns: BTreeMap<String, usize>,
    /// Names of categorical columns, in header order.
    pub string_columns: Vec<String>,
    /// Names of numeric columns, in header order.
    pub numeric_columns: Vec<String>,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Up to [`DEFAULT_PREVIEW_ROWS`] rows as column-name maps; missing
    /// cells serialize as `null`.
    pub preview: Vec<BTreeMap<String, Cell>>,
}

impl DatasetProfile {
    /// Flatten this profile into the boundary report shape.
    pub fn to_report(&self) -> AnalysisReport {
        let mut null_columns = BTreeMap::new();
        let mut string_columns = Vec::new();
        let mut numeric_columns = Vec::new();

        for col in &self.columns {
            null_columns.insert(col.name.clone(), col.null_count);
            match col.kind {
                ColumnKind::Numeric => numeric_columns.push(col.name.clone()),
                ColumnKind::Categorical => string_columns.push(col.name.clone()),
            }
        }

        let preview = self
            .preview
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(col, cell)| (col.name.clone(), cell.clone()))
                    .collect()
            })
            .collect();

        AnalysisReport {
            null_columns,
            string_columns,
            numeric_columns,
            row_count: self.row_count,
            column_count: self.column_count,
            preview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnKind, ProfileOptions, profile, profile_with_options};
    use crate::types::Dataset;

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        let cols = columns.iter().map(|c| (*c).to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| {
                        if v.is_empty() {
                            None
                        } else {
                            Some((*v).to_string())
                        }
                    })
                    .collect()
            })
            .collect();
        Dataset::new(cols, rows).unwrap()
    }

    #[test]
    fn numeric_column_gets_mean_min_max() {
        let ds = dataset(&["a"], &[&["1"], &["2"], &["3"]]);
        let prof = profile(&ds);
        let col = &prof.columns[0];
        assert_eq!(col.kind, ColumnKind::Numeric);
        let num = col.numeric.as_ref().unwrap();
        assert_eq!(num.mean, 2.0);
        assert_eq!(num.min, 1.0);
        assert_eq!(num.max, 3.0);
        assert_eq!(num.non_missing, 3);
    }

    #[test]
    fn one_bad_cell_forces_categorical() {
        let ds = dataset(&["a"], &[&["1"], &["2"], &["oops"], &["4"]]);
        let prof = profile(&ds);
        let col = &prof.columns[0];
        assert_eq!(col.kind, ColumnKind::Categorical);
        assert!(col.numeric.is_none());
        // Categories include the numeric-looking values seen before the
        // verdict flipped.
        let cat = col.categorical.as_ref().unwrap();
        assert_eq!(cat.distinct_categories, vec!["1", "2", "oops", "4"]);
        assert_eq!(cat.most_common.as_deref(), Some("1"));
    }

    #[test]
    fn missing_cells_are_counted_and_skipped() {
        let ds = dataset(&["a"], &[&["1"], &[""], &["3"]]);
        let prof = profile(&ds);
        let col = &prof.columns[0];
        assert_eq!(col.null_count, 1);
        assert_eq!(col.kind, ColumnKind::Numeric);
        assert_eq!(col.numeric.as_ref().unwrap().mean, 2.0);
    }

    #[test]
    fn all_missing_column_is_numeric_with_zero_defaults() {
        let ds = dataset(&["a"], &[&[""], &[""], &[""]]);
        let prof = profile(&ds);
        let col = &prof.columns[0];
        assert_eq!(col.kind, ColumnKind::Numeric);
        assert_eq!(col.null_count, 3);
        let num = col.numeric.as_ref().unwrap();
        assert_eq!(num.mean, 0.0);
        assert_eq!(num.min, 0.0);
        assert_eq!(num.max, 0.0);
        assert_eq!(num.non_missing, 0);
    }

    #[test]
    fn whitespace_only_cell_is_categorical_not_missing() {
        let ds = dataset(&["a"], &[&["1"], &[" "]]);
        let prof = profile(&ds);
        let col = &prof.columns[0];
        assert_eq!(col.null_count, 0);
        assert_eq!(col.kind, ColumnKind::Categorical);
    }

    #[test]
    fn padded_whitespace_numbers_still_parse() {
        let ds = dataset(&["a"], &[&[" 1.5 "], &["2.5"]]);
        let prof = profile(&ds);
        assert_eq!(prof.columns[0].kind, ColumnKind::Numeric);
        assert_eq!(prof.columns[0].numeric.as_ref().unwrap().mean, 2.0);
    }

    #[test]
    fn empty_dataset_profiles_without_error() {
        let prof = profile(&Dataset::empty());
        assert_eq!(prof.row_count, 0);
        assert_eq!(prof.column_count, 0);
        assert!(prof.columns.is_empty());
        assert!(prof.preview.is_empty());
    }

    #[test]
    fn zero_row_dataset_keeps_header_columns() {
        let ds = dataset(&["a", "b"], &[]);
        let prof = profile(&ds);
        assert_eq!(prof.row_count, 0);
        assert_eq!(prof.column_count, 2);
        assert_eq!(prof.columns.len(), 2);
        // No rows means no non-missing cells: numeric with zero defaults.
        assert_eq!(prof.columns[0].kind, ColumnKind::Numeric);
    }

    #[test]
    fn category_cap_truncates_and_flags() {
        let rows: Vec<Vec<Option<String>>> = (0..10)
            .map(|i| vec![Some(format!("cat_{i}"))])
            .collect();
        let ds = Dataset::new(vec!["a".into()], rows).unwrap();
        let opts = ProfileOptions {
            max_distinct_categories: 3,
            ..Default::default()
        };
        let prof = profile_with_options(&ds, &opts);
        let cat = prof.columns[0].categorical.as_ref().unwrap();
        assert_eq!(cat.distinct_categories.len(), 3);
        assert!(cat.truncated);
        assert_eq!(cat.most_common.as_deref(), Some("cat_0"));
    }

    #[test]
    fn duplicate_categories_do_not_trip_the_cap() {
        let rows: Vec<Vec<Option<String>>> =
            (0..10).map(|_| vec![Some("x".to_string())]).collect();
        let ds = Dataset::new(vec!["a".into()], rows).unwrap();
        let opts = ProfileOptions {
            max_distinct_categories: 1,
            ..Default::default()
        };
        let prof = profile_with_options(&ds, &opts);
        // Unanimously non-numeric column with one distinct value.
        assert_eq!(prof.columns[0].kind, ColumnKind::Categorical);
        let cat = prof.columns[0].categorical.as_ref().unwrap();
        assert_eq!(cat.distinct_categories, vec!["x"]);
        assert!(!cat.truncated);
    }

    #[test]
    fn preview_defaults_to_five_rows() {
        let rows: Vec<Vec<Option<String>>> =
            (0..8).map(|i| vec![Some(i.to_string())]).collect();
        let ds = Dataset::new(vec!["a".into()], rows).unwrap();
        let prof = profile(&ds);
        assert_eq!(prof.preview.len(), 5);
        assert_eq!(prof.preview[0][0], Some("0".to_string()));
    }

    #[test]
    fn report_splits_columns_by_kind() {
        let ds = dataset(
            &["a", "b"],
            &[&["1", "x"], &["2", "y"], &["", ""]],
        );
        let report = profile(&ds).to_report();
        assert_eq!(report.numeric_columns, vec!["a"]);
        assert_eq!(report.string_columns, vec!["b"]);
        assert_eq!(report.null_columns["a"], 1);
        assert_eq!(report.null_columns["b"], 1);
        assert_eq!(report.row_count, 3);
        assert_eq!(report.column_count, 2);
        assert_eq!(report.preview.len(), 3);
        assert_eq!(report.preview[0]["b"], Some("x".to_string()));
        assert_eq!(report.preview[2]["a"], None);
    }

    #[test]
    fn report_round_trips_through_json() {
        let ds = dataset(&["a", "b"], &[&["1", "x"]]);
        let report = profile(&ds).to_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: super::AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
