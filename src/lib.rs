//! `csv-profiler` is a small library for profiling uploaded CSV datasets: it
//! ingests raw bytes into an in-memory [`types::Dataset`], infers each
//! column's type (numeric vs. categorical), counts missing values, and
//! produces summary statistics plus a bounded row preview.
//!
//! The primary pipeline is [`ingestion::ingest_csv_from_bytes`] followed by
//! [`profiling::profile`]; [`profiling::DatasetProfile::to_report`] flattens
//! the result into the JSON shape a boundary layer (HTTP handler, CLI)
//! returns to its caller.
//!
//! ## Type inference rule
//!
//! A column is numeric iff **every** non-missing cell converts losslessly to
//! a float; a single non-numeric non-missing cell anywhere forces the whole
//! column categorical. There is no majority rule. Missing cells (absent
//! fields or empty strings) increment the column's null count and otherwise
//! take no part in classification or statistics.
//!
//! ## Quick example: ingest, profile, report
//!
//! ```
//! use csv_profiler::ingestion::{CsvOptions, ingest_csv_from_bytes};
//! use csv_profiler::profiling::profile;
//!
//! # fn main() -> Result<(), csv_profiler::ProfilerError> {
//! let body = b"age,city\n34,Berlin\n28,Lagos\n,Berlin\n";
//! let ds = ingest_csv_from_bytes(body, &CsvOptions::default())?;
//!
//! let prof = profile(&ds);
//! assert_eq!(prof.row_count, 3);
//!
//! let report = prof.to_report();
//! assert_eq!(report.numeric_columns, vec!["age"]);
//! assert_eq!(report.string_columns, vec!["city"]);
//! assert_eq!(report.null_columns["age"], 1);
//!
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! assert!(json.contains("\"row_count\": 3"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Preprocessing
//!
//! [`preprocessing::preprocess`] layers naive imputation and encoding on top
//! of the profiling verdicts: numeric columns get mean imputation,
//! categorical columns get first-category fill plus first-seen-order label
//! encoding.
//!
//! ```
//! use csv_profiler::ingestion::{CsvOptions, ingest_csv_from_bytes};
//! use csv_profiler::preprocessing::preprocess;
//!
//! # fn main() -> Result<(), csv_profiler::ProfilerError> {
//! let ds = ingest_csv_from_bytes(b"x,color\n1,red\n,blue\n3,red\n", &CsvOptions::default())?;
//! let encoded = preprocess(&ds);
//!
//! assert_eq!(encoded.shape(), (3, 2));
//! // Missing x imputed with the mean of {1, 3}; colors label-encoded.
//! assert_eq!(encoded.rows[1], vec![2.0, 1.0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//!
//! Ingestion accepts an [`ingestion::IngestObserver`] for logging and
//! alerting, with stderr, file, and composite implementations provided:
//!
//! ```
//! use std::sync::Arc;
//!
//! use csv_profiler::ingestion::{CsvOptions, Severity, StdErrObserver, ingest_csv_from_path};
//!
//! let opts = CsvOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     alert_at_or_above: Severity::Critical,
//!     ..Default::default()
//! };
//!
//! // Missing files are Critical and trigger `on_alert` at this threshold.
//! let _err = ingest_csv_from_path("does_not_exist.csv", &opts).unwrap_err();
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV bytes → [`types::Dataset`], plus observer hooks
//! - [`types`]: the raw-cell dataset model
//! - [`profiling`]: the profiler and its boundary report
//! - [`preprocessing`]: mean imputation + label encoding
//! - [`error`]: the shared error type

pub mod error;
pub mod ingestion;
pub mod preprocessing;
pub mod profiling;
pub mod types;

pub use error::{ProfilerError, ProfilerResult};
