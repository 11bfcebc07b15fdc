//! # URF-RS: Universal Recording Format engine
//!
//! A session-based event recorder and toolkit around a line-delimited
//! recording format. The engine records typed, timestamped events to
//! append-only JSONL artifacts, loads them back for querying, scores two
//! recordings for regression equivalence, and transcodes recordings into
//! third-party replay formats.
//!
//! ## Architecture
//!
//! - **Recorder**: owns the session lifecycle and appends events to
//!   per-session artifacts, safe to drive from many threads
//! - **Reader**: reconstructs an artifact into an ordered event
//!   collection, tolerant of malformed lines
//! - **Comparer**: multi-factor similarity scoring of an actual run
//!   against a golden reference
//! - **Exporters**: pluggable transcoders; asciinema v2 ships as the
//!   reference implementation
//!
//! Event payloads are opaque structured data: the engine never interprets
//! what a host records beyond the shared envelope, so the same format
//! serves terminal captures, cell-grid frames, input traces and
//! application state snapshots alike.
//!
//! ## Example
//!
//! ```no_run
//! use urf_rs::event::{OutputEvent, RecordingEvent, RecordingMetadata, TerminalOutputData};
//! use urf_rs::{Recording, RecordingComparer, UniversalRecorder};
//!
//! fn main() -> urf_rs::Result<()> {
//!     let recorder = UniversalRecorder::new("recordings/urf")?;
//!     recorder.start_recording("demo", RecordingMetadata::new("demo"))?;
//!     recorder.record_event(
//!         "demo",
//!         &RecordingEvent::Output(
//!             OutputEvent::new(0.1, TerminalOutputData::text("Hello, URF!\n").into())
//!                 .with_stream("terminal"),
//!         ),
//!     )?;
//!     let path = recorder.stop_recording("demo")?;
//!
//!     let actual = Recording::load(&path)?;
//!     let golden = Recording::load("recordings/golden.urf.jsonl")?;
//!     let comparison = RecordingComparer::default().compare(&actual, &golden);
//!     println!("{}", comparison.summary());
//!     Ok(())
//! }
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod reader;
pub mod recorder;

// Re-export commonly used types
pub use compare::{ComparisonOptions, RecordingComparer, RecordingComparison};
pub use config::RecorderConfig;
pub use error::{Result, ResultExt, UrfError};
pub use event::{EventKind, RecordingEvent, RecordingMetadata};
pub use export::{AsciinemaExporter, RecordingExporter};
pub use reader::Recording;
pub use recorder::UniversalRecorder;
