//! Event taxonomy for the Universal Recording Format
//!
//! This module contains the typed events that make up a recording and the
//! metadata attached to every session.
//!
//! # Main Types
//!
//! - [`RecordingEvent`] - Closed tagged union over the four event variants
//! - [`EventKind`] - Copyable discriminator used for filtering and counting
//! - [`RecordingMetadata`] - Session metadata carried by the first event
//! - [`TerminalOutputData`] / [`CellGridOutputData`] / [`KeyboardInputData`] -
//!   typed builders for the otherwise opaque `data` payloads
//!
//! # Envelope
//!
//! Every event shares the same envelope: a `t` timestamp in seconds since
//! recording start (set by the producer, never by the recorder), the `type`
//! discriminator, an optional `stream` channel label and an optional `seq`
//! ordering hint. The discriminator string is a durable on-disk contract;
//! it is persisted verbatim and drives decoding, and must not change
//! without a bump of [`MetadataEvent::version`].
//!
//! # Payloads
//!
//! The `data` field of input/output/state events is an opaque
//! [`serde_json::Value`] tree. Payload shape varies by stream and producer
//! and is never fully known to this crate; downstream consumers probe
//! specific keys defensively. The typed payload structs below cover the
//! two shapes the exporter understands plus the common keyboard shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Format version written into every metadata event
pub const FORMAT_VERSION: &str = "1.0";

/// Event type discriminator
///
/// The wire representation is the lowercase string returned by
/// [`EventKind::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// Session metadata, always the first event
    Meta,
    /// Input event (keyboard, mouse)
    Input,
    /// Output event (terminal bytes or cell grid)
    Output,
    /// State snapshot event (application/game state)
    State,
}

impl EventKind {
    /// Get all event kinds
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::Meta,
            EventKind::Input,
            EventKind::Output,
            EventKind::State,
        ]
    }

    /// The discriminator string persisted on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Meta => "meta",
            EventKind::Input => "input",
            EventKind::Output => "output",
            EventKind::State => "state",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded event
///
/// Serializes as one self-contained JSON object per line, tagged by the
/// `type` field. Decoding an unknown discriminator fails the line parse,
/// which the reader treats as a skippable malformed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RecordingEvent {
    /// Recording metadata event (first event in recording)
    #[serde(rename = "meta")]
    Meta(MetadataEvent),
    /// Input event (keyboard, mouse)
    #[serde(rename = "input")]
    Input(InputEvent),
    /// Output event (terminal bytes or cell grid)
    #[serde(rename = "output")]
    Output(OutputEvent),
    /// State snapshot event (game state, application state)
    #[serde(rename = "state")]
    State(StateEvent),
}

impl RecordingEvent {
    /// The discriminator of this event
    pub fn kind(&self) -> EventKind {
        match self {
            RecordingEvent::Meta(_) => EventKind::Meta,
            RecordingEvent::Input(_) => EventKind::Input,
            RecordingEvent::Output(_) => EventKind::Output,
            RecordingEvent::State(_) => EventKind::State,
        }
    }

    /// Timestamp in seconds since recording start
    pub fn timestamp(&self) -> f64 {
        match self {
            RecordingEvent::Meta(e) => e.timestamp,
            RecordingEvent::Input(e) => e.timestamp,
            RecordingEvent::Output(e) => e.timestamp,
            RecordingEvent::State(e) => e.timestamp,
        }
    }

    /// Stream channel label, if any
    pub fn stream(&self) -> Option<&str> {
        match self {
            RecordingEvent::Meta(e) => e.stream.as_deref(),
            RecordingEvent::Input(e) => e.stream.as_deref(),
            RecordingEvent::Output(e) => e.stream.as_deref(),
            RecordingEvent::State(e) => e.stream.as_deref(),
        }
    }

    /// Sequence ordering hint, if any
    pub fn sequence(&self) -> Option<i64> {
        match self {
            RecordingEvent::Meta(e) => e.sequence,
            RecordingEvent::Input(e) => e.sequence,
            RecordingEvent::Output(e) => e.sequence,
            RecordingEvent::State(e) => e.sequence,
        }
    }
}

/// Recording metadata event (first event in recording)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEvent {
    /// Timestamp, fixed at 0 for the metadata event
    #[serde(rename = "t")]
    pub timestamp: f64,

    /// Stream identifier (unused on metadata events, kept for the envelope)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,

    /// Optional sequence number for ordering
    #[serde(rename = "seq", skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,

    /// Format version of the recording
    #[serde(default = "default_version")]
    pub version: String,

    /// Session metadata
    pub recording: RecordingMetadata,
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}

impl MetadataEvent {
    /// Create the metadata event for a session, with `t = 0`
    pub fn new(recording: RecordingMetadata) -> Self {
        Self {
            timestamp: 0.0,
            stream: None,
            sequence: None,
            version: default_version(),
            recording,
        }
    }
}

/// Input event (keyboard, mouse)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Timestamp in seconds since recording start
    #[serde(rename = "t")]
    pub timestamp: f64,

    /// Stream identifier (e.g. `keyboard`, `mouse`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,

    /// Optional sequence number for ordering
    #[serde(rename = "seq", skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,

    /// Opaque input description
    #[serde(default)]
    pub data: Value,
}

/// Output event (terminal bytes or cell grid)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEvent {
    /// Timestamp in seconds since recording start
    #[serde(rename = "t")]
    pub timestamp: f64,

    /// Stream identifier (e.g. `terminal`, `cells`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,

    /// Optional sequence number for ordering
    #[serde(rename = "seq", skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,

    /// Opaque output payload
    #[serde(default)]
    pub data: Value,
}

/// State snapshot event (game state, application state)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    /// Timestamp in seconds since recording start
    #[serde(rename = "t")]
    pub timestamp: f64,

    /// Stream identifier (e.g. `gameplay`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,

    /// Optional sequence number for ordering
    #[serde(rename = "seq", skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,

    /// Opaque state snapshot
    #[serde(default)]
    pub data: Value,
}

impl InputEvent {
    /// Create a new input event with the given timestamp and payload
    pub fn new(timestamp: f64, data: Value) -> Self {
        Self {
            timestamp,
            stream: None,
            sequence: None,
            data,
        }
    }

    /// Set the stream channel label
    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    /// Set the sequence ordering hint
    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

impl OutputEvent {
    /// Create a new output event with the given timestamp and payload
    pub fn new(timestamp: f64, data: Value) -> Self {
        Self {
            timestamp,
            stream: None,
            sequence: None,
            data,
        }
    }

    /// Set the stream channel label
    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    /// Set the sequence ordering hint
    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

impl StateEvent {
    /// Create a new state event with the given timestamp and payload
    pub fn new(timestamp: f64, data: Value) -> Self {
        Self {
            timestamp,
            stream: None,
            sequence: None,
            data,
        }
    }

    /// Set the stream channel label
    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    /// Set the sequence ordering hint
    pub fn with_sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

/// Metadata for a recording session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    /// Session identifier
    pub id: String,

    /// When the session was started
    pub started: DateTime<Utc>,

    /// Name of the software that produced the recording
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Platform tag (e.g. `linux`, `console`)
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Free-form environment map
    #[serde(default)]
    pub environment: BTreeMap<String, String>,

    /// Application that was recorded
    #[serde(default)]
    pub application: ApplicationInfo,

    /// Terminal geometry, if the recording has a terminal surface
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<TerminalInfo>,

    /// Streams the session declares up front
    #[serde(default)]
    pub streams: Vec<String>,
}

fn default_generator() -> String {
    "URF Recorder".to_string()
}

fn default_platform() -> String {
    "unknown".to_string()
}

impl Default for RecordingMetadata {
    fn default() -> Self {
        Self {
            id: String::new(),
            started: Utc::now(),
            generator: default_generator(),
            platform: default_platform(),
            environment: BTreeMap::new(),
            application: ApplicationInfo::default(),
            terminal: None,
            streams: Vec::new(),
        }
    }
}

impl RecordingMetadata {
    /// Create metadata for a session id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the generator name
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Set the platform tag
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set the application info
    pub fn with_application(mut self, application: ApplicationInfo) -> Self {
        self.application = application;
        self
    }

    /// Set the terminal info
    pub fn with_terminal(mut self, terminal: TerminalInfo) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Set the declared stream list
    pub fn with_streams(mut self, streams: Vec<String>) -> Self {
        self.streams = streams;
        self
    }

    /// Add an environment entry
    pub fn with_environment(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }
}

/// Application that produced the recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    /// Application name
    #[serde(default)]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,

    /// Source commit, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

fn default_app_version() -> String {
    "1.0.0".to_string()
}

impl Default for ApplicationInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: default_app_version(),
            commit: None,
        }
    }
}

impl ApplicationInfo {
    /// Create application info with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the version string
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Terminal geometry and encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalInfo {
    /// Terminal width in columns
    pub width: u32,

    /// Terminal height in rows
    pub height: u32,

    /// Color depth
    #[serde(default = "default_color_depth")]
    pub color_depth: u32,

    /// Text encoding
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_color_depth() -> u32 {
    256
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

impl TerminalInfo {
    /// Create terminal info from a width and height
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color_depth: default_color_depth(),
            encoding: default_encoding(),
        }
    }
}

/// Terminal output data (byte stream)
///
/// One of the two output payload shapes recognized by the exporter:
/// either `text` holds the output directly, or `bytes` holds it
/// base64-encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalOutputData {
    /// Output format (e.g. `ansi`)
    #[serde(default = "default_terminal_format")]
    pub format: String,

    /// Base64-encoded raw bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,

    /// Output text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

fn default_terminal_format() -> String {
    "ansi".to_string()
}

impl TerminalOutputData {
    /// Create a textual terminal payload
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            format: default_terminal_format(),
            bytes: None,
            text: Some(text.into()),
        }
    }

    /// Create a base64-encoded byte payload
    pub fn bytes(base64: impl Into<String>) -> Self {
        Self {
            format: default_terminal_format(),
            bytes: Some(base64.into()),
            text: None,
        }
    }
}

impl From<TerminalOutputData> for Value {
    fn from(data: TerminalOutputData) -> Self {
        serde_json::to_value(data).expect("terminal payload is always serializable")
    }
}

/// Cell grid output data (for cell-based renderers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGridOutputData {
    /// Output format, fixed to `grid`
    #[serde(default = "default_grid_format")]
    pub format: String,

    /// Grid width in cells
    pub width: u32,

    /// Grid height in cells
    pub height: u32,

    /// Cells that changed in this frame
    #[serde(default)]
    pub cells: Vec<CellData>,
}

fn default_grid_format() -> String {
    "grid".to_string()
}

impl CellGridOutputData {
    /// Create an empty grid frame
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            format: default_grid_format(),
            width,
            height,
            cells: Vec::new(),
        }
    }
}

impl From<CellGridOutputData> for Value {
    fn from(data: CellGridOutputData) -> Self {
        serde_json::to_value(data).expect("grid payload is always serializable")
    }
}

/// A single cell in a grid frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    /// Column
    pub x: u32,

    /// Row
    pub y: u32,

    /// Character in the cell
    #[serde(rename = "ch")]
    pub char: String,

    /// Foreground color
    #[serde(rename = "fg", skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,

    /// Background color
    #[serde(rename = "bg", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl CellData {
    /// Create a cell at a position
    pub fn new(x: u32, y: u32, char: impl Into<String>) -> Self {
        Self {
            x,
            y,
            char: char.into(),
            foreground: None,
            background: None,
        }
    }

    /// Set the foreground color
    pub fn with_foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    /// Set the background color
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }
}

/// Keyboard input data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardInputData {
    /// Key name (e.g. `a`, `Enter`)
    pub key: String,

    /// Physical key code, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Active modifiers (e.g. `ctrl`, `shift`)
    #[serde(default)]
    pub modifiers: Vec<String>,

    /// Whether the key was pressed (true) or released (false)
    pub pressed: bool,
}

impl KeyboardInputData {
    /// Create a key-press payload
    pub fn pressed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: None,
            modifiers: Vec::new(),
            pressed: true,
        }
    }
}

impl From<KeyboardInputData> for Value {
    fn from(data: KeyboardInputData) -> Self {
        serde_json::to_value(data).expect("keyboard payload is always serializable")
    }
}
