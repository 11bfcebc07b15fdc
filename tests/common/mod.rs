//! Shared helpers for integration tests

#![allow(dead_code)] // Test utilities may not all be used in every test file

use urf_rs::event::{
    ApplicationInfo, InputEvent, KeyboardInputData, OutputEvent, RecordingEvent,
    RecordingMetadata, StateEvent, TerminalInfo, TerminalOutputData,
};
use urf_rs::UniversalRecorder;

/// Install a subscriber so parse warnings show up under
/// `RUST_LOG=urf_rs=debug` when running tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Metadata the sample sessions record with
pub fn sample_metadata(session_id: &str) -> RecordingMetadata {
    RecordingMetadata::new(session_id)
        .with_generator("URF Test Harness")
        .with_platform("console")
        .with_application(ApplicationInfo::new("URF Integration Tests").with_version("1.0.0"))
        .with_terminal(TerminalInfo::new(80, 24))
        .with_streams(vec!["terminal".to_string(), "keyboard".to_string()])
}

/// A recorder writing into a fresh temporary directory
pub fn temp_recorder() -> (tempfile::TempDir, UniversalRecorder) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let recorder = UniversalRecorder::new(dir.path().join("urf")).expect("create recorder");
    (dir, recorder)
}

/// Record the canonical two-event session: terminal output at 0.1s and a
/// key press at 0.5s. Returns the artifact path.
pub fn record_sample_session(
    recorder: &UniversalRecorder,
    session_id: &str,
) -> std::path::PathBuf {
    recorder
        .start_recording(session_id, sample_metadata(session_id))
        .expect("start recording");

    recorder
        .record_event(
            session_id,
            &RecordingEvent::Output(
                OutputEvent::new(0.1, TerminalOutputData::text("Hello, URF!\n").into())
                    .with_stream("terminal"),
            ),
        )
        .expect("record output");

    recorder
        .record_event(
            session_id,
            &RecordingEvent::Input(
                InputEvent::new(0.5, KeyboardInputData::pressed("q").into())
                    .with_stream("keyboard"),
            ),
        )
        .expect("record input");

    recorder.stop_recording(session_id).expect("stop recording")
}

/// A state event on the `gameplay` stream
pub fn gameplay_state(timestamp: f64) -> RecordingEvent {
    RecordingEvent::State(
        StateEvent::new(
            timestamp,
            serde_json::json!({"player": {"hp": 100, "level": 1}, "floor": 1}),
        )
        .with_stream("gameplay"),
    )
}
