//! Integration tests for the recording lifecycle
//!
//! These tests validate the complete record-then-load workflow:
//! - Session start/stop and error cases
//! - Artifact contents and round-tripping through the reader
//! - Concurrent recording across and within sessions

mod common;

use common::{gameplay_state, record_sample_session, sample_metadata, temp_recorder};
use std::sync::Arc;
use std::thread;
use urf_rs::event::{EventKind, InputEvent, RecordingEvent, StateEvent};
use urf_rs::{Recording, UniversalRecorder, UrfError};

#[test]
fn test_recorded_session_round_trips_through_reader() {
    let (_dir, recorder) = temp_recorder();
    let path = record_sample_session(&recorder, "roundtrip");

    let recording = Recording::load(&path).unwrap();
    assert_eq!(recording.len(), 3);
    assert_eq!(recording.skipped_lines(), 0);
    assert_eq!(recording.duration(), 0.5);

    let counts = recording.event_counts();
    assert_eq!(counts.get("meta"), Some(&1));
    assert_eq!(counts.get("output"), Some(&1));
    assert_eq!(counts.get("input"), Some(&1));

    // Filtering by variant returns only that variant, order preserved
    for kind in EventKind::all() {
        for event in recording.of_kind(*kind) {
            assert_eq!(event.kind(), *kind);
        }
    }

    let metadata = recording.metadata().unwrap();
    assert_eq!(metadata.timestamp, 0.0);
    assert_eq!(metadata.recording.id, "roundtrip");
    assert_eq!(metadata.recording.terminal.as_ref().unwrap().width, 80);
}

#[test]
fn test_record_before_start_fails() {
    let (_dir, recorder) = temp_recorder();
    let err = recorder
        .record_event("nobody", &gameplay_state(0.1))
        .unwrap_err();
    assert!(matches!(err, UrfError::NoActiveSession { .. }));
}

#[test]
fn test_start_on_active_session_does_not_corrupt_artifact() {
    let (_dir, recorder) = temp_recorder();
    recorder
        .start_recording("busy", sample_metadata("busy"))
        .unwrap();
    recorder.record_event("busy", &gameplay_state(0.1)).unwrap();

    let err = recorder
        .start_recording("busy", sample_metadata("busy"))
        .unwrap_err();
    assert!(matches!(err, UrfError::AlreadyRecording { .. }));

    recorder.record_event("busy", &gameplay_state(0.2)).unwrap();
    let path = recorder.stop_recording("busy").unwrap();

    let recording = Recording::load(&path).unwrap();
    assert_eq!(recording.skipped_lines(), 0);
    assert_eq!(recording.len(), 3);
    assert_eq!(recording.event_counts().get("state"), Some(&2));
}

#[test]
fn test_timestamps_preserved_in_file_order() {
    let (_dir, recorder) = temp_recorder();
    recorder
        .start_recording("order", sample_metadata("order"))
        .unwrap();

    // Deliberately out of order: the recorder appends in call order and
    // the reader must not silently re-sort
    for t in [0.5, 0.2, 0.9] {
        recorder.record_event("order", &gameplay_state(t)).unwrap();
    }
    let path = recorder.stop_recording("order").unwrap();

    let recording = Recording::load(&path).unwrap();
    let timestamps: Vec<f64> = recording
        .of_kind(EventKind::State)
        .map(|e| e.timestamp())
        .collect();
    assert_eq!(timestamps, vec![0.5, 0.2, 0.9]);
}

#[test]
fn test_events_in_range_query() {
    let (_dir, recorder) = temp_recorder();
    recorder
        .start_recording("range", sample_metadata("range"))
        .unwrap();
    for t in [0.1, 0.2, 0.3, 0.4, 0.5] {
        recorder.record_event("range", &gameplay_state(t)).unwrap();
    }
    let path = recorder.stop_recording("range").unwrap();

    let recording = Recording::load(&path).unwrap();
    // Inclusive on both ends; the meta event at t=0 is outside
    let in_range: Vec<f64> = recording
        .events_in_range(0.2, 0.4)
        .map(|e| e.timestamp())
        .collect();
    assert_eq!(in_range, vec![0.2, 0.3, 0.4]);
}

#[test]
fn test_load_tolerates_corrupted_lines() {
    common::init_tracing();
    let (_dir, recorder) = temp_recorder();
    let path = record_sample_session(&recorder, "corrupt");

    // Corrupt the artifact: append garbage between valid records
    let mut content = std::fs::read_to_string(&path).unwrap();
    content.push_str("this is not json\n");
    content.push_str("{\"t\":0.7,\"type\":\"annotation\",\"data\":{}}\n");
    content.push_str(&serde_json::to_string(&gameplay_state(0.8)).unwrap());
    content.push('\n');
    std::fs::write(&path, content).unwrap();

    let recording = Recording::load(&path).unwrap();
    assert_eq!(recording.len(), 4);
    assert_eq!(recording.skipped_lines(), 2);
    assert_eq!(recording.duration(), 0.8);
}

#[test]
fn test_parallel_sessions_are_isolated() {
    let (_dir, recorder) = temp_recorder();
    let recorder = Arc::new(recorder);

    let mut handles = Vec::new();
    for worker in 0..4 {
        let recorder: Arc<UniversalRecorder> = Arc::clone(&recorder);
        handles.push(thread::spawn(move || {
            let session_id = format!("worker-{}", worker);
            recorder
                .start_recording(&session_id, sample_metadata(&session_id))
                .unwrap();
            for i in 0..25 {
                recorder
                    .record_event(&session_id, &gameplay_state(i as f64 / 100.0))
                    .unwrap();
            }
            recorder.stop_recording(&session_id).unwrap()
        }));
    }

    for handle in handles {
        let path = handle.join().unwrap();
        let recording = Recording::load(&path).unwrap();
        assert_eq!(recording.len(), 26);
        assert_eq!(recording.skipped_lines(), 0);
    }
    assert!(recorder.active_sessions().is_empty());
}

#[test]
fn test_same_session_writers_never_interleave() {
    let (_dir, recorder) = temp_recorder();
    let recorder = Arc::new(recorder);
    recorder
        .start_recording("shared", sample_metadata("shared"))
        .unwrap();

    let mut handles = Vec::new();
    for worker in 0..8 {
        let recorder = Arc::clone(&recorder);
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                let event = RecordingEvent::Input(
                    InputEvent::new(
                        worker as f64 + i as f64 / 1000.0,
                        // Large payload to make torn writes likely if the
                        // critical section were wrong
                        serde_json::json!({"key": "a", "pad": "x".repeat(512)}),
                    )
                    .with_stream("keyboard"),
                );
                recorder.record_event("shared", &event).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(recorder.event_count("shared"), Some(400));
    let path = recorder.stop_recording("shared").unwrap();

    let recording = Recording::load(&path).unwrap();
    assert_eq!(recording.skipped_lines(), 0);
    assert_eq!(recording.len(), 401);
    assert_eq!(recording.event_counts().get("input"), Some(&400));
}

#[test]
fn test_stress_many_events_single_session() {
    let (_dir, recorder) = temp_recorder();
    recorder
        .start_recording("stress", sample_metadata("stress"))
        .unwrap();

    for i in 0..2000 {
        let event = RecordingEvent::State(StateEvent::new(
            i as f64 / 1000.0,
            serde_json::json!({"tick": i}),
        ));
        recorder.record_event("stress", &event).unwrap();
    }
    let path = recorder.stop_recording("stress").unwrap();

    let recording = Recording::load(&path).unwrap();
    assert_eq!(recording.len(), 2001);
    assert_eq!(recording.duration(), 1.999);
}
