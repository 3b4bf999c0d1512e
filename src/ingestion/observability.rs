use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ProfilerError;

/// Severity classification used for observer callbacks and alerting
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (ingestion failed).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

/// Context about an ingestion attempt.
///
/// `source` is a human-readable label for where the bytes came from: a file
/// path, or `"<bytes>"` / `"<reader>"` for in-memory input.
#[derive(Debug, Clone)]
pub struct IngestContext {
    /// Label for the byte source.
    pub source: String,
}

impl IngestContext {
    pub(crate) fn for_path(path: &Path) -> Self {
        Self {
            source: path.display().to_string(),
        }
    }

    pub(crate) fn for_label(label: &str) -> Self {
        Self {
            source: label.to_string(),
        }
    }
}

/// Shape stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    /// Number of ingested data rows (header excluded).
    pub rows: usize,
    /// Number of header-derived columns.
    pub columns: usize,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts. All callbacks
/// have empty defaults so an observer only implements what it cares about.
pub trait IngestObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &IngestContext, _stats: IngestStats) {}

    /// Called when ingestion fails.
    fn on_failure(&self, _ctx: &IngestContext, _severity: Severity, _error: &ProfilerError) {}

    /// Called when a failure meets the configured alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestContext, severity: Severity, error: &ProfilerError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Fans out callbacks to a list of observers, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestObserver>>,
}

impl CompositeObserver {
    /// Create a composite from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestContext, stats: IngestStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestContext, severity: Severity, error: &ProfilerError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestContext, severity: Severity, error: &ProfilerError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs ingestion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IngestObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestContext, stats: IngestStats) {
        eprintln!(
            "[csv][ok] source={} rows={} columns={}",
            ctx.source, stats.rows, stats.columns
        );
    }

    fn on_failure(&self, ctx: &IngestContext, severity: Severity, error: &ProfilerError) {
        eprintln!("[csv][{severity:?}] source={} err={error}", ctx.source);
    }

    fn on_alert(&self, ctx: &IngestContext, severity: Severity, error: &ProfilerError) {
        eprintln!("[ALERT][csv][{severity:?}] source={} err={error}", ctx.source);
    }
}

/// Appends ingestion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are
    /// ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl IngestObserver for FileObserver {
    fn on_success(&self, ctx: &IngestContext, stats: IngestStats) {
        self.append_line(&format!(
            "{} ok source={} rows={} columns={}",
            unix_ts(),
            ctx.source,
            stats.rows,
            stats.columns
        ));
    }

    fn on_failure(&self, ctx: &IngestContext, severity: Severity, error: &ProfilerError) {
        self.append_line(&format!(
            "{} fail severity={severity:?} source={} err={error}",
            unix_ts(),
            ctx.source
        ));
    }

    fn on_alert(&self, ctx: &IngestContext, severity: Severity, error: &ProfilerError) {
        self.append_line(&format!(
            "{} ALERT severity={severity:?} source={} err={error}",
            unix_ts(),
            ctx.source
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
