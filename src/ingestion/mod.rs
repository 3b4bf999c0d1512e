//! CSV ingestion entrypoints.
//!
//! Ingestion is the profiler's external collaborator: it turns raw bytes into
//! a [`crate::types::Dataset`] of untyped cells, using the first record as
//! the header unless reconfigured. Malformed byte streams are rejected here;
//! the profiler itself never sees them.
//!
//! - [`csv::ingest_csv_from_bytes`] / [`csv::ingest_csv_from_reader`] /
//!   [`csv::ingest_csv_from_path`]: the ingestion functions
//! - [`observability`]: observer hooks for success/failure/alert reporting

pub mod csv;
pub mod observability;

pub use csv::{CsvOptions, DEFAULT_MAX_INPUT_BYTES, ingest_csv_from_bytes, ingest_csv_from_path, ingest_csv_from_reader};
pub use observability::{
    CompositeObserver, FileObserver, IngestContext, IngestObserver, IngestStats, Severity,
    StdErrObserver,
};
