//! Error handling for URF-RS
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for URF-RS operations
#[derive(Error, Debug)]
pub enum UrfError {
    /// A recording session was started while already active
    #[error("Session '{session_id}' is already recording")]
    AlreadyRecording { session_id: String },

    /// An event was recorded or a session stopped without an active session
    #[error("No active recording for session '{session_id}'")]
    NoActiveSession { session_id: String },

    /// A recording artifact does not exist on disk
    #[error("Recording not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A recording artifact violates the format contract
    #[error("Invalid recording format: {0}")]
    InvalidFormat(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<UrfError>,
    },
}

impl UrfError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        UrfError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for UrfError {
    fn from(err: serde_json::Error) -> Self {
        UrfError::Serialization(err.to_string())
    }
}

/// Result type alias for URF-RS operations
pub type Result<T> = std::result::Result<T, UrfError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
