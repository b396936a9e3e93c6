//! End-to-end pipeline tests
//!
//! Runs the full classification → actuation → telemetry flow against
//! in-memory doubles: a recording actuator link, the in-memory backend,
//! a pinned clock, and a seeded allocator.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use cradlesense_actuators::{ActuatorLink, LinkError};
use cradlesense_core::{
    time::FixedClock, Assignee, CoinFlipAllocator, GestureKind, HealthStatus, Mood,
    RoundRobinAllocator, QUADRANT, WINDOW,
};
use cradlesense_engine::{Engine, EngineConfig, EngineError};
use cradlesense_store::{MemoryBackend, StaticKeys};

/// Records every command; optionally fails them all
#[derive(Default)]
struct RecordingLink {
    sent: Mutex<Vec<(String, Value)>>,
    fail: bool,
}

impl RecordingLink {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl ActuatorLink for RecordingLink {
    fn send(&self, path: &str, payload: &Value) -> Result<(), LinkError> {
        self.sent
            .lock()
            .unwrap()
            .push((path.to_string(), payload.clone()));
        if self.fail {
            Err(LinkError::Unreachable("device offline".into()))
        } else {
            Ok(())
        }
    }
}

type TestEngine = Engine<Arc<MemoryBackend>, StaticKeys, Arc<RecordingLink>>;

fn engine_with(link: Arc<RecordingLink>) -> (TestEngine, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let engine = Engine::new(
        &EngineConfig::default(),
        backend.clone(),
        StaticKeys::single(1, [0x5A; 32]),
        link,
        Box::new(CoinFlipAllocator::from_seed(2024)),
    )
    .with_clock(FixedClock::new(1_700_000_000_000));
    (engine, backend)
}

fn engine() -> (TestEngine, Arc<RecordingLink>) {
    let link = Arc::new(RecordingLink::default());
    let (engine, _) = engine_with(link.clone());
    (engine, link)
}

/// Sample differing from a zero baseline by `delta` over one index range
fn sample_with(range: std::ops::Range<usize>, delta: f64) -> Vec<f64> {
    let mut sample = vec![0.0; WINDOW];
    for v in &mut sample[range] {
        *v = delta;
    }
    sample
}

#[test]
fn wave_sample_dispatches_dance_and_persists_both_records() {
    let (engine, link) = engine();

    // First quadrant moves by 300 against a zero baseline. Motion 75 and
    // left-top 300 satisfy both the wave and pointing rules; priority
    // makes it a wave.
    let outcome = engine
        .process_sample("alice", &sample_with(0..QUADRANT, 300.0))
        .unwrap();

    assert_eq!(outcome.classification.kind, GestureKind::Wave);
    assert_eq!(outcome.classification.motion, 75.0);
    assert_eq!(outcome.dispatch.delivered, 1);

    let sent = link.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "/motor/dance");

    // Mean brightness of this sample is 75: neutral
    assert_eq!(outcome.mood.status, Mood::Neutral);

    let gestures = engine.gesture_history("alice").unwrap();
    assert_eq!(gestures.records.len(), 1);
    assert_eq!(gestures.records[0], outcome.classification);
    assert_eq!(engine.mood_history("alice").unwrap().records.len(), 1);
}

#[test]
fn clap_fans_out_three_commands() {
    let (engine, link) = engine();

    let outcome = engine
        .process_sample("alice", &vec![250.0; WINDOW])
        .unwrap();
    assert_eq!(outcome.classification.kind, GestureKind::Clap);
    assert_eq!(outcome.dispatch.attempted, 3);

    let sent = link.sent.lock().unwrap();
    let paths: Vec<&str> = sent.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(paths.len(), 3);
    assert!(paths.contains(&"/led"));
    assert!(paths.contains(&"/sound"));
    assert!(paths.contains(&"/vibrate"));
}

#[test]
fn baseline_is_replaced_after_each_run() {
    let (engine, link) = engine();
    let sample = vec![250.0; WINDOW];

    // First run diffs against the zeroed baseline: a clap
    let first = engine.process_sample("alice", &sample).unwrap();
    assert_eq!(first.classification.kind, GestureKind::Clap);

    // Second identical run diffs against the first sample: still frame
    let second = engine.process_sample("alice", &sample).unwrap();
    assert_eq!(second.classification.kind, GestureKind::None);
    assert_eq!(second.classification.motion, 0.0);
    assert_eq!(second.dispatch.attempted, 0);

    // Only the clap's three commands ever went out
    assert_eq!(link.sent.lock().unwrap().len(), 3);
}

#[test]
fn baselines_are_per_user() {
    let (engine, _) = engine();
    let sample = vec![250.0; WINDOW];

    engine.process_sample("alice", &sample).unwrap();
    // Bob still diffs against his own zeroed baseline
    let outcome = engine.process_sample("bob", &sample).unwrap();
    assert_eq!(outcome.classification.kind, GestureKind::Clap);
}

#[test]
fn offline_device_fails_open() {
    let link = Arc::new(RecordingLink::failing());
    let (engine, _) = engine_with(link.clone());

    let outcome = engine
        .process_sample("alice", &vec![250.0; WINDOW])
        .unwrap();

    // All three clap commands attempted and failed; the run still
    // succeeded and telemetry was written
    assert_eq!(outcome.dispatch.failed, 3);
    assert_eq!(outcome.dispatch.delivered, 0);
    assert_eq!(engine.gesture_history("alice").unwrap().records.len(), 1);
    assert_eq!(engine.dispatcher().stats().failed, 3);
}

#[test]
fn undersized_sample_aborts_only_this_run() {
    let (engine, link) = engine();

    let err = engine.process_sample("alice", &[1.0, 2.0]).unwrap_err();
    assert!(matches!(err, EngineError::Classify(_)));
    assert!(link.sent.lock().unwrap().is_empty());
    assert!(engine.gesture_history("alice").unwrap().records.is_empty());

    // The engine keeps serving afterwards
    assert!(engine.process_sample("alice", &vec![0.0; WINDOW]).is_ok());
}

#[test]
fn fever_dispatches_alert_and_persists() {
    let (engine, link) = engine();

    let normal = engine.process_temperature("alice", 36.8).unwrap();
    assert_eq!(normal.reading.status, HealthStatus::Normal);
    assert_eq!(normal.dispatch.attempted, 0);

    let fever = engine.process_temperature("alice", 38.6).unwrap();
    assert_eq!(fever.reading.status, HealthStatus::Abnormal);
    assert_eq!(fever.dispatch.delivered, 1);
    assert_eq!(link.sent.lock().unwrap()[0].0, "/alert");

    let history = engine.health_history("alice").unwrap();
    assert_eq!(history.records.len(), 2);
    assert_eq!(history.records[0].temperature, 36.8);
    assert_eq!(history.records[1].temperature, 38.6);
}

#[test]
fn nan_temperature_is_rejected() {
    let (engine, _) = engine();
    assert!(matches!(
        engine.process_temperature("alice", f64::NAN),
        Err(EngineError::Classify(_))
    ));
}

#[test]
fn smile_threshold_applies_to_mean_brightness() {
    let (engine, _) = engine();

    let outcome = engine
        .process_sample("alice", &vec![160.0; WINDOW])
        .unwrap();
    assert_eq!(outcome.mood.status, Mood::Smile);
    assert_eq!(outcome.mood.brightness, 160.0);
}

#[test]
fn task_allocation_is_persisted_in_order() {
    let (engine, _) = engine();
    let tasks = ["check_child", "play_time", "feed"];

    let assignments = engine.allocate_tasks("alice", &tasks).unwrap();
    assert_eq!(assignments.len(), 3);

    let history = engine.task_history("alice").unwrap();
    assert_eq!(history.skipped, 0);
    assert_eq!(history.records, assignments);
    for (record, task) in history.records.iter().zip(&tasks) {
        assert_eq!(record.task, *task);
    }
}

#[test]
fn seeded_allocators_agree() {
    let backend_a = Arc::new(MemoryBackend::new());
    let backend_b = Arc::new(MemoryBackend::new());
    let make = |backend| {
        Engine::new(
            &EngineConfig::default(),
            backend,
            StaticKeys::single(1, [0x5A; 32]),
            Arc::new(RecordingLink::default()),
            Box::new(CoinFlipAllocator::from_seed(7)),
        )
    };
    let tasks = ["a", "b", "c", "d", "e"];

    let first = make(backend_a).allocate_tasks("alice", &tasks).unwrap();
    let second = make(backend_b).allocate_tasks("alice", &tasks).unwrap();
    assert_eq!(first, second);
}

#[test]
fn round_robin_allocator_can_be_substituted() {
    let backend = Arc::new(MemoryBackend::new());
    let engine = Engine::new(
        &EngineConfig::default(),
        backend,
        StaticKeys::single(1, [0x5A; 32]),
        Arc::new(RecordingLink::default()),
        Box::new(RoundRobinAllocator::default()),
    );

    let assignments = engine.allocate_tasks("alice", &["a", "b"]).unwrap();
    assert_eq!(assignments[0].assignee, Assignee::PartyA);
    assert_eq!(assignments[1].assignee, Assignee::PartyB);
}

#[test]
fn corrupt_entry_skips_exactly_one_record() {
    let link = Arc::new(RecordingLink::default());
    let (engine, backend) = engine_with(link);

    for delta in [60.0, 70.0, 80.0] {
        engine
            .process_sample("alice", &sample_with(0..QUADRANT, delta))
            .unwrap();
    }
    assert!(backend.tamper("users/alice/gestures", 1, |blob| {
        blob[20] ^= 0xFF;
    }));

    let history = engine.gesture_history("alice").unwrap();
    assert_eq!(history.skipped, 1);
    assert_eq!(history.records.len(), 2);
}

#[test]
fn consent_is_a_single_overwritten_value() {
    let (engine, _) = engine();

    assert_eq!(engine.consent("alice").unwrap(), None);
    engine.record_consent("alice", true).unwrap();
    engine.record_consent("alice", false).unwrap();

    let consent = engine.consent("alice").unwrap().unwrap();
    assert!(!consent.agreed);
    assert_eq!(consent.timestamp, 1_700_000_000_000);
}

#[test]
fn community_events_are_shared_and_ordered() {
    let (engine, _) = engine();

    engine
        .record_community_event("story time", "2026-09-01T10:00")
        .unwrap();
    engine
        .record_community_event("checkup", "2026-09-02T14:00")
        .unwrap();

    let events = engine.community_events().unwrap();
    assert_eq!(events.records.len(), 2);
    assert_eq!(events.records[0].name, "story time");
    assert_eq!(events.records[1].name, "checkup");
}

#[test]
fn pipeline_timestamps_come_from_the_injected_clock() {
    let (engine, _) = engine();
    let outcome = engine.process_temperature("alice", 37.0).unwrap();
    assert_eq!(outcome.reading.timestamp, 1_700_000_000_000);
}
