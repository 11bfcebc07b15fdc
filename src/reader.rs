//! Loading and querying recorded sessions
//!
//! This module contains [`Recording`], the in-memory form of a recorded
//! session: an ordered, immutable event sequence loaded from a JSONL
//! artifact, plus pure derived queries over it.
//!
//! # Fault Tolerance
//!
//! [`Recording::load`] parses every non-blank line independently. A line
//! that fails to parse (malformed JSON, unknown or missing `type`
//! discriminator) is skipped with a warning, never fatal: loading a
//! partially corrupted artifact succeeds and yields the well-formed
//! subset. The number of skipped lines is kept for diagnostics.
//!
//! # Ordering
//!
//! Events are kept in artifact line order, which is the write order. By
//! producer contract timestamps are non-decreasing, but the reader never
//! re-sorts; a synthetic artifact with out-of-order timestamps loads in
//! file order.

use crate::error::{Result, UrfError};
use crate::event::{EventKind, MetadataEvent, RecordingEvent};
use std::collections::BTreeMap;
use std::path::Path;

/// A loaded recording: an ordered event sequence with derived queries
#[derive(Debug, Clone, Default)]
pub struct Recording {
    events: Vec<RecordingEvent>,
    skipped_lines: usize,
}

impl Recording {
    /// Load a recording from a JSONL artifact
    ///
    /// Fails with [`UrfError::NotFound`] if the artifact does not exist.
    /// Blank lines are ignored; malformed lines are skipped with a
    /// warning. An artifact containing only blank lines loads as an
    /// empty recording.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(UrfError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let mut events = Vec::new();
        let mut skipped_lines = 0;

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<RecordingEvent>(line) {
                Ok(event) => events.push(event),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = index + 1,
                        "skipping malformed record: {}",
                        e
                    );
                    skipped_lines += 1;
                }
            }
        }

        Ok(Self {
            events,
            skipped_lines,
        })
    }

    /// Create a recording from an already-materialized event sequence
    ///
    /// Useful for synthesizing recordings in tests and for comparing
    /// sequences that never touched disk.
    pub fn from_events(events: Vec<RecordingEvent>) -> Self {
        Self {
            events,
            skipped_lines: 0,
        }
    }

    /// All events, in artifact line order
    pub fn events(&self) -> &[RecordingEvent] {
        &self.events
    }

    /// Iterate over all events in order
    pub fn iter(&self) -> std::slice::Iter<'_, RecordingEvent> {
        self.events.iter()
    }

    /// Number of loaded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the recording contains no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of lines skipped as malformed during load
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Events of one variant, preserving order
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &RecordingEvent> {
        self.events.iter().filter(move |e| e.kind() == kind)
    }

    /// The first metadata event, or `None`
    pub fn metadata(&self) -> Option<&MetadataEvent> {
        self.events.iter().find_map(|e| match e {
            RecordingEvent::Meta(meta) => Some(meta),
            _ => None,
        })
    }

    /// Events whose timestamp falls in `[start, end]`, inclusive
    pub fn events_in_range(&self, start: f64, end: f64) -> impl Iterator<Item = &RecordingEvent> {
        self.events
            .iter()
            .filter(move |e| e.timestamp() >= start && e.timestamp() <= end)
    }

    /// Total duration: the maximum timestamp across all events, or 0 for
    /// an empty recording
    pub fn duration(&self) -> f64 {
        if self.events.is_empty() {
            return 0.0;
        }
        self.events
            .iter()
            .map(RecordingEvent::timestamp)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Occurrence count per observed discriminator
    ///
    /// Keys are only the discriminators that actually occur; an empty
    /// recording yields an empty map.
    pub fn event_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.events {
            *counts.entry(event.kind().as_str().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Recording {
    type Item = &'a RecordingEvent;
    type IntoIter = std::slice::Iter<'a, RecordingEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
