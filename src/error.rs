use thiserror::Error;

/// Convenience result type for ingestion and profiling operations.
pub type ProfilerResult<T> = Result<T, ProfilerError>;

/// Error type shared across CSV ingestion and dataset construction.
///
/// Profiling itself never fails: "all values missing" and "mixed types" are
/// handled data conditions, not errors. Every failure here originates at the
/// ingestion boundary and propagates unchanged to the caller.
#[derive(Debug, Error)]
pub enum ProfilerError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV tokenizer error (malformed quoting, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input could not be decoded into rows and columns at all
    /// (empty file, zero-column header).
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The input exceeds the boundary upload cap. Enforced at ingestion,
    /// never inside the profiler.
    #[error("input too large: {actual} bytes exceeds the {limit} byte limit")]
    InputTooLarge { actual: u64, limit: u64 },

    /// A dataset is structurally inconsistent in a way profiling cannot
    /// normalize (e.g. rows without a column set).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}
