use std::sync::{Arc, Mutex};

use csv_profiler::ProfilerError;
use csv_profiler::ingestion::{
    CsvOptions, IngestContext, IngestObserver, IngestStats, Severity, ingest_csv_from_bytes,
    ingest_csv_from_path,
};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestStats>>,
    failures: Mutex<Vec<Severity>>,
    alerts: Mutex<Vec<Severity>>,
}

impl IngestObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestContext, stats: IngestStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &IngestContext, severity: Severity, _error: &ProfilerError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestContext, severity: Severity, _error: &ProfilerError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

#[test]
fn observer_receives_stats_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = CsvOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let ds = ingest_csv_from_bytes(b"a,b\n1,2\n3,4\n", &opts).unwrap();
    assert_eq!(ds.row_count(), 2);

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes, vec![IngestStats { rows: 2, columns: 2 }]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = CsvOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: Severity::Critical,
        ..Default::default()
    };

    // Missing file -> Io error -> Critical
    let _ = ingest_csv_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![Severity::Critical]);
    assert_eq!(alerts, vec![Severity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = CsvOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: Severity::Critical,
        max_bytes: Some(4),
        ..Default::default()
    };

    // Size cap -> Error severity (not Critical) -> should not alert
    let _ = ingest_csv_from_bytes(b"a,b\n1,2\n", &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![Severity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn alert_threshold_can_be_lowered() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = CsvOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: Severity::Error,
        ..Default::default()
    };

    // Empty input -> Parse error -> Error severity, which now alerts.
    let _ = ingest_csv_from_bytes(b"", &opts).unwrap_err();

    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(alerts, vec![Severity::Error]);
}
