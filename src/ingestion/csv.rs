//! CSV ingestion implementation.
//!
//! Turns raw CSV bytes into a [`Dataset`] of untyped cells. The first record
//! is the header unless [`CsvOptions::has_headers`] is cleared, in which case
//! synthetic `col_0..col_n` names are derived from the first record's width.
//!
//! Rules:
//!
//! - Empty input (no header record) is a [`ProfilerError::Parse`] failure;
//!   a header-only file is a legitimate zero-row dataset.
//! - Records shorter than the header are padded with missing cells; records
//!   longer than the header are truncated. Empty fields become missing cells.
//! - The boundary upload cap ([`CsvOptions::max_bytes`], 30 MB by default)
//!   is enforced here, never inside the profiler.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ProfilerError, ProfilerResult};
use crate::types::{Cell, Dataset};

use super::observability::{IngestContext, IngestObserver, IngestStats, Severity};

/// Default boundary cap on input size: 30 MB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 30 * 1024 * 1024;

/// Options controlling CSV ingestion.
///
/// Use [`Default`] for common cases: comma delimiter, header row, 30 MB cap,
/// no observer.
#[derive(Clone)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the first record is a header row. When `false`, columns are
    /// named `col_0..col_n` after the first record's width.
    pub has_headers: bool,
    /// Upper bound on input size in bytes; `None` disables the cap.
    pub max_bytes: Option<u64>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for CsvOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvOptions")
            .field("delimiter", &(self.delimiter as char))
            .field("has_headers", &self.has_headers)
            .field("max_bytes", &self.max_bytes)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            max_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Ingest a CSV file into an in-memory [`Dataset`].
pub fn ingest_csv_from_path(
    path: impl AsRef<Path>,
    options: &CsvOptions,
) -> ProfilerResult<Dataset> {
    let path = path.as_ref();
    let ctx = IngestContext::for_path(path);
    let result = File::open(path)
        .map_err(ProfilerError::from)
        .and_then(|file| read_and_parse(file, options));
    report(options, &ctx, result)
}

/// Ingest raw CSV bytes into an in-memory [`Dataset`].
///
/// This is the entry point a boundary layer (HTTP handler, CLI) feeds an
/// uploaded body into.
pub fn ingest_csv_from_bytes(bytes: &[u8], options: &CsvOptions) -> ProfilerResult<Dataset> {
    let ctx = IngestContext::for_label("<bytes>");
    let result = match options.max_bytes {
        Some(limit) if bytes.len() as u64 > limit => Err(ProfilerError::InputTooLarge {
            actual: bytes.len() as u64,
            limit,
        }),
        _ => parse_dataset(bytes, options),
    };
    report(options, &ctx, result)
}

/// Ingest CSV data from an arbitrary reader.
///
/// The reader is drained up to [`CsvOptions::max_bytes`] before parsing.
pub fn ingest_csv_from_reader<R: Read>(reader: R, options: &CsvOptions) -> ProfilerResult<Dataset> {
    let ctx = IngestContext::for_label("<reader>");
    report(options, &ctx, read_and_parse(reader, options))
}

fn read_and_parse<R: Read>(mut reader: R, options: &CsvOptions) -> ProfilerResult<Dataset> {
    let mut buf = Vec::new();
    match options.max_bytes {
        Some(limit) => {
            // Read one byte past the cap so exceeding it is detectable.
            reader.by_ref().take(limit.saturating_add(1)).read_to_end(&mut buf)?;
            if buf.len() as u64 > limit {
                return Err(ProfilerError::InputTooLarge {
                    actual: buf.len() as u64,
                    limit,
                });
            }
        }
        None => {
            reader.read_to_end(&mut buf)?;
        }
    }
    parse_dataset(&buf, options)
}

fn parse_dataset(bytes: &[u8], options: &CsvOptions) -> ProfilerResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(bytes);

    let header: Option<Vec<String>> = if options.has_headers {
        let headers = rdr.headers()?;
        if headers.is_empty() {
            return Err(ProfilerError::Parse {
                line: 1,
                message: "input contains no header record".to_string(),
            });
        }
        Some(headers.iter().map(str::to_string).collect())
    } else {
        None
    };

    let mut records: Vec<csv::StringRecord> = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    let column_names = match header {
        Some(names) => names,
        None => match records.first() {
            Some(first) => (0..first.len()).map(|i| format!("col_{i}")).collect(),
            None => {
                return Err(ProfilerError::Parse {
                    line: 1,
                    message: "input contains no records".to_string(),
                });
            }
        },
    };

    let width = column_names.len();
    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(records.len());
    for record in &records {
        let mut row: Vec<Cell> = Vec::with_capacity(width);
        for i in 0..width {
            row.push(match record.get(i) {
                None | Some("") => None,
                Some(v) => Some(v.to_string()),
            });
        }
        rows.push(row);
    }

    Dataset::new(column_names, rows)
}

fn report(
    options: &CsvOptions,
    ctx: &IngestContext,
    result: ProfilerResult<Dataset>,
) -> ProfilerResult<Dataset> {
    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                ctx,
                IngestStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }
    result
}

fn severity_for_error(e: &ProfilerError) -> Severity {
    match e {
        ProfilerError::Io(_) => Severity::Critical,
        ProfilerError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        ProfilerError::Parse { .. }
        | ProfilerError::InputTooLarge { .. }
        | ProfilerError::InvalidInput { .. } => Severity::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvOptions, ingest_csv_from_bytes};
    use crate::error::ProfilerError;

    #[test]
    fn header_row_becomes_column_names() {
        let ds =
            ingest_csv_from_bytes(b"a,b\n1,x\n2,y\n", &CsvOptions::default()).unwrap();
        assert_eq!(ds.column_names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.cell(0, 1), Some(&Some("x".to_string())));
    }

    #[test]
    fn empty_fields_become_missing_cells() {
        let ds = ingest_csv_from_bytes(b"a,b\n1,\n", &CsvOptions::default()).unwrap();
        assert_eq!(ds.cell(0, 1), Some(&None));
    }

    #[test]
    fn short_records_are_padded() {
        let ds = ingest_csv_from_bytes(b"a,b,c\n1,2\n", &CsvOptions::default()).unwrap();
        assert_eq!(ds.cell(0, 2), Some(&None));
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let err = ingest_csv_from_bytes(b"", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, ProfilerError::Parse { line: 1, .. }));
    }

    #[test]
    fn header_only_input_is_a_zero_row_dataset() {
        let ds = ingest_csv_from_bytes(b"a,b\n", &CsvOptions::default()).unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 2);
    }

    #[test]
    fn headerless_input_gets_synthetic_names() {
        let opts = CsvOptions {
            has_headers: false,
            ..Default::default()
        };
        let ds = ingest_csv_from_bytes(b"1,x\n2,y\n", &opts).unwrap();
        assert_eq!(ds.column_names(), &["col_0".to_string(), "col_1".to_string()]);
        assert_eq!(ds.row_count(), 2);
    }

    #[test]
    fn custom_delimiter() {
        let opts = CsvOptions {
            delimiter: b';',
            ..Default::default()
        };
        let ds = ingest_csv_from_bytes(b"a;b\n1;2\n", &opts).unwrap();
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.cell(0, 0), Some(&Some("1".to_string())));
    }

    #[test]
    fn oversized_input_is_rejected() {
        let opts = CsvOptions {
            max_bytes: Some(8),
            ..Default::default()
        };
        let err = ingest_csv_from_bytes(b"a,b\n1,2\n3,4\n", &opts).unwrap_err();
        assert!(matches!(
            err,
            ProfilerError::InputTooLarge { limit: 8, .. }
        ));
    }

    #[test]
    fn quoted_fields_survive_intact() {
        let ds = ingest_csv_from_bytes(
            b"name,note\nAda,\"hello, world\"\n",
            &CsvOptions::default(),
        )
        .unwrap();
        assert_eq!(ds.cell(0, 1), Some(&Some("hello, world".to_string())));
    }
}
