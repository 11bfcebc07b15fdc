//! Session recorder for capturing typed event streams
//!
//! This module contains the [`UniversalRecorder`], which owns the session
//! lifecycle and appends events to per-session JSONL artifacts.
//!
//! # Session Lifecycle
//!
//! A session is created by [`UniversalRecorder::start_recording`], mutated
//! by every [`UniversalRecorder::record_event`] and destroyed by
//! [`UniversalRecorder::stop_recording`], which flushes and releases the
//! file handle and returns the artifact path. A session id may not be
//! started twice while active, and operations on an unknown session id
//! fail with [`UrfError::NoActiveSession`].
//!
//! # Concurrency
//!
//! The active-session table is the only shared mutable state. All
//! operations take the registry lock for the duration of their table
//! access; `record_event` keeps it across the lookup-and-write sequence,
//! so writes to the same session never interleave and no event is lost.
//! Each write is flushed before the lock is released, keeping the artifact
//! durably consistent with the in-memory state.
//!
//! # Example
//!
//! ```no_run
//! use urf_rs::event::{OutputEvent, RecordingEvent, RecordingMetadata, TerminalOutputData};
//! use urf_rs::recorder::UniversalRecorder;
//!
//! # fn main() -> urf_rs::Result<()> {
//! let recorder = UniversalRecorder::new("recordings/urf")?;
//! recorder.start_recording("demo", RecordingMetadata::new("demo"))?;
//!
//! let event = RecordingEvent::Output(
//!     OutputEvent::new(0.1, TerminalOutputData::text("Hello, URF!\n").into())
//!         .with_stream("terminal"),
//! );
//! recorder.record_event("demo", &event)?;
//!
//! let path = recorder.stop_recording("demo")?;
//! println!("recorded to {}", path.display());
//! # Ok(())
//! # }
//! ```

use crate::config::RecorderConfig;
use crate::error::{Result, UrfError};
use crate::event::{MetadataEvent, RecordingEvent, RecordingMetadata};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// An active recording session
#[derive(Debug)]
struct RecordingSession {
    file: File,
    path: PathBuf,
    started: DateTime<Utc>,
    event_count: u64,
}

impl RecordingSession {
    /// Append one serialized event line and flush it to the artifact
    fn write_line(&mut self, event: &RecordingEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        self.file.write_all(json.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        Ok(())
    }
}

/// Records typed events to per-session JSONL artifacts
///
/// The recorder is safe to share across threads (`&self` operations
/// behind a registry mutex); wrap it in an `Arc` to record from multiple
/// producers. Dropping the recorder closes every open session handle.
#[derive(Debug)]
pub struct UniversalRecorder {
    recordings_dir: PathBuf,
    sessions: Mutex<HashMap<String, RecordingSession>>,
}

impl UniversalRecorder {
    /// Create a recorder writing artifacts into `recordings_dir`
    ///
    /// The directory (and any missing parents) is created if absent.
    pub fn new(recordings_dir: impl Into<PathBuf>) -> Result<Self> {
        let recordings_dir = recordings_dir.into();
        std::fs::create_dir_all(&recordings_dir)?;
        Ok(Self {
            recordings_dir,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Create a recorder from a [`RecorderConfig`]
    pub fn with_config(config: &RecorderConfig) -> Result<Self> {
        Self::new(&config.recordings_dir)
    }

    /// Directory artifacts are written to
    pub fn recordings_dir(&self) -> &Path {
        &self.recordings_dir
    }

    /// Start a new recording session
    ///
    /// Creates the artifact, writes the metadata event as its first line
    /// with `t = 0` and registers the session as active. Fails with
    /// [`UrfError::AlreadyRecording`] if the session id is active; the
    /// existing session and its artifact are left untouched.
    pub fn start_recording(&self, session_id: &str, metadata: RecordingMetadata) -> Result<()> {
        let mut sessions = self.sessions();
        if sessions.contains_key(session_id) {
            return Err(UrfError::AlreadyRecording {
                session_id: session_id.to_string(),
            });
        }

        let started = Utc::now();
        let file_name = format!(
            "session-{}-{}.urf.jsonl",
            session_id,
            started.format("%Y%m%d-%H%M%S")
        );
        let path = self.recordings_dir.join(file_name);
        let file = File::create(&path)?;

        let mut session = RecordingSession {
            file,
            path,
            started,
            event_count: 0,
        };
        session.write_line(&RecordingEvent::Meta(MetadataEvent::new(metadata)))?;

        tracing::debug!(
            session_id,
            path = %session.path.display(),
            "recording started"
        );
        sessions.insert(session_id.to_string(), session);
        Ok(())
    }

    /// Record an event to an active session
    ///
    /// Appends one serialized line to the session artifact and flushes it
    /// immediately. Fails with [`UrfError::NoActiveSession`] if the
    /// session id is not active. Timestamps are taken from the event as
    /// supplied by the producer; the recorder never assigns or normalizes
    /// them.
    pub fn record_event(&self, session_id: &str, event: &RecordingEvent) -> Result<()> {
        let mut sessions = self.sessions();
        let session =
            sessions
                .get_mut(session_id)
                .ok_or_else(|| UrfError::NoActiveSession {
                    session_id: session_id.to_string(),
                })?;

        session.write_line(event)?;
        session.event_count += 1;
        Ok(())
    }

    /// Stop a recording session
    ///
    /// Removes the session from the active set, flushes and releases the
    /// file handle, and returns the artifact path. Fails with
    /// [`UrfError::NoActiveSession`] if the session id is not active;
    /// stopping twice fails the same way the second time.
    pub fn stop_recording(&self, session_id: &str) -> Result<PathBuf> {
        let mut session = {
            let mut sessions = self.sessions();
            sessions
                .remove(session_id)
                .ok_or_else(|| UrfError::NoActiveSession {
                    session_id: session_id.to_string(),
                })?
        };

        session.file.flush()?;
        tracing::debug!(
            session_id,
            events = session.event_count,
            duration_s = (Utc::now() - session.started).num_milliseconds() as f64 / 1000.0,
            "recording stopped"
        );
        Ok(session.path)
    }

    /// Check if a session is currently recording
    ///
    /// Pure query, never fails.
    pub fn is_recording(&self, session_id: &str) -> bool {
        self.sessions().contains_key(session_id)
    }

    /// Number of events recorded to an active session, excluding the
    /// metadata event, or `None` if the session is not active
    pub fn event_count(&self, session_id: &str) -> Option<u64> {
        self.sessions().get(session_id).map(|s| s.event_count)
    }

    /// Ids of all currently active sessions, in unspecified order
    pub fn active_sessions(&self) -> Vec<String> {
        self.sessions().keys().cloned().collect()
    }

    /// A poisoned registry lock only means another writer panicked
    /// mid-operation; the table itself is still consistent, so recover
    /// the guard rather than propagating the poison.
    fn sessions(&self) -> MutexGuard<'_, HashMap<String, RecordingSession>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}
