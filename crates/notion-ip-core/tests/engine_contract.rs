//! Contract Test: Single-pass engine
//!
//! Constraints verified:
//! - One run resolves once and records at most once
//! - A resolver failure stops the run before any recorder call
//! - Recorder failures propagate to the caller
//! - Repeated runs with the same address do not duplicate records

mod common;

use common::*;
use notion_ip_core::{Engine, Error, RecordOutcome};

#[tokio::test]
async fn run_resolves_then_records_once() {
    let source = StaticSource::returning("5.6.7.8");
    let recorder = MockRecorder::new();

    let engine = Engine::new(
        Box::new(StaticSource::sharing_counters_with(&source)),
        Box::new(MockRecorder::sharing_counters_with(&recorder)),
    );

    let report = engine.run_once().await.expect("run succeeds");

    assert_eq!(report.address, "5.6.7.8");
    assert_eq!(report.outcome, RecordOutcome::Appended { previous: None });
    assert_eq!(source.resolve_call_count(), 1);
    assert_eq!(recorder.record_call_count(), 1);
}

#[tokio::test]
async fn resolver_exhaustion_skips_recorder() {
    let recorder = MockRecorder::new();

    let engine = Engine::new(
        Box::new(StaticSource::exhausted()),
        Box::new(MockRecorder::sharing_counters_with(&recorder)),
    );

    let err = engine.run_once().await.unwrap_err();

    assert!(matches!(err, Error::ResolverExhausted(_)), "got {err:?}");
    assert!(err.is_fatal());
    assert_eq!(recorder.record_call_count(), 0);
}

#[tokio::test]
async fn write_failure_propagates() {
    let engine = Engine::new(
        Box::new(StaticSource::returning("5.6.7.8")),
        Box::new(MockRecorder::failing()),
    );

    let err = engine.run_once().await.unwrap_err();

    assert!(matches!(err, Error::NotionWrite(_)), "got {err:?}");
    assert!(err.to_string().contains("body failed validation"));
}

#[tokio::test]
async fn repeated_runs_with_same_address_do_not_duplicate() {
    let recorder = MockRecorder::with_recorded("1.2.3.4");

    for _ in 0..3 {
        let engine = Engine::new(
            Box::new(StaticSource::returning("1.2.3.4")),
            Box::new(MockRecorder::sharing_counters_with(&recorder)),
        );
        let report = engine.run_once().await.expect("run succeeds");
        assert_eq!(report.outcome, RecordOutcome::Unchanged);
    }

    assert_eq!(recorder.record_call_count(), 3);
    assert_eq!(recorder.recorded().len(), 1);
}

#[tokio::test]
async fn address_change_between_runs_is_recorded() {
    let recorder = MockRecorder::with_recorded("1.2.3.4");

    let engine = Engine::new(
        Box::new(StaticSource::returning("5.6.7.8")),
        Box::new(MockRecorder::sharing_counters_with(&recorder)),
    );
    let report = engine.run_once().await.expect("run succeeds");

    assert!(report.outcome.wrote());
    let recorded: Vec<String> = recorder
        .recorded()
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(recorded, vec!["1.2.3.4", "5.6.7.8"]);
}
