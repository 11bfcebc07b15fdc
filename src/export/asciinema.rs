//! Asciicast v2 transcoder
//!
//! Converts a recording artifact into the asciinema v2 `.cast` format:
//! a JSON header line followed by `[time, "o", data]` output rows. Only
//! `output` events on the `terminal` stream are carried over; cell-grid
//! frames, state snapshots and inputs have no asciicast representation
//! and are deliberately excluded.

use crate::error::{Result, ResultExt, UrfError};
use crate::event::{RecordingEvent, TerminalInfo};
use crate::export::RecordingExporter;
use base64::engine::general_purpose;
use base64::Engine as _;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Terminal geometry assumed when the recording declares none
const DEFAULT_GEOMETRY: (u32, u32) = (80, 24);

/// Asciicast v2 header line
#[derive(Debug, Serialize)]
struct CastHeader<'a> {
    version: u32,
    width: u32,
    height: u32,
    timestamp: i64,
    title: &'a str,
    env: BTreeMap<&'static str, &'static str>,
}

/// Exports recordings to asciinema v2 format
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciinemaExporter;

impl RecordingExporter for AsciinemaExporter {
    fn format_name(&self) -> &str {
        "asciinema"
    }

    fn file_extension(&self) -> &str {
        ".cast"
    }

    /// Export a recording to an asciicast file
    ///
    /// Fails with [`UrfError::NotFound`] if the source does not exist and
    /// with [`UrfError::InvalidFormat`] if it is empty or its first record
    /// is not a `meta` event. Malformed lines and output events without a
    /// usable payload are skipped individually; one bad line never aborts
    /// the export.
    fn export(&self, source: &Path, output: &Path) -> Result<PathBuf> {
        if !source.exists() {
            return Err(UrfError::NotFound {
                path: source.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(source)?;
        let mut lines = content.lines();

        let first = lines
            .next()
            .ok_or_else(|| UrfError::InvalidFormat("recording is empty".to_string()))?;
        let meta = match serde_json::from_str::<RecordingEvent>(first) {
            Ok(RecordingEvent::Meta(meta)) => meta,
            _ => {
                return Err(UrfError::InvalidFormat(
                    "first record must be a meta event".to_string(),
                ))
            }
        };

        let recording = &meta.recording;
        let (width, height) = recording
            .terminal
            .as_ref()
            .map(|t: &TerminalInfo| (t.width, t.height))
            .unwrap_or(DEFAULT_GEOMETRY);

        let header = CastHeader {
            version: 2,
            width,
            height,
            timestamp: recording.started.timestamp(),
            title: &recording.application.name,
            env: BTreeMap::from([("SHELL", "/bin/bash"), ("TERM", "xterm-256color")]),
        };

        let mut cast = serde_json::to_string(&header)?;
        cast.push('\n');

        let mut exported = 0usize;
        let mut skipped = 0usize;
        for line in lines {
            match transcode_output_line(line) {
                Some(row) => {
                    cast.push_str(&row);
                    cast.push('\n');
                    exported += 1;
                }
                None => skipped += 1,
            }
        }

        std::fs::write(output, cast)
            .map_err(UrfError::Io)
            .with_context(|| format!("Failed to write asciicast to {:?}", output))?;
        tracing::debug!(
            source = %source.display(),
            output = %output.display(),
            exported,
            skipped,
            "asciicast export finished"
        );
        Ok(output.to_path_buf())
    }
}

/// Transcode one artifact line into an asciicast output row
///
/// Returns `None` for anything that has no asciicast representation:
/// malformed lines, non-output events, streams other than `terminal`,
/// and output events whose payload yields no text.
fn transcode_output_line(line: &str) -> Option<String> {
    let root: Value = serde_json::from_str(line).ok()?;

    if root.get("type").and_then(Value::as_str) != Some("output") {
        return None;
    }
    if root.get("stream").and_then(Value::as_str) != Some("terminal") {
        return None;
    }

    let time = root.get("t")?.as_f64()?;
    let data = root.get("data")?;

    let text = if let Some(text) = data.get("text") {
        text.as_str().unwrap_or_default().to_string()
    } else if let Some(bytes) = data.get("bytes").and_then(Value::as_str) {
        let decoded = general_purpose::STANDARD.decode(bytes).ok()?;
        String::from_utf8(decoded).ok()?
    } else {
        return None;
    };

    if text.is_empty() {
        return None;
    }

    serde_json::to_string(&(time, "o", &text)).ok()
}
