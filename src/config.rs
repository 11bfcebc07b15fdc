//! Recorder configuration
//!
//! This module contains the persistent configuration for the recording
//! engine: where artifacts are written and how metadata identifies the
//! producer. Hosts typically ship a small TOML file next to their own
//! configuration and hand the loaded [`RecorderConfig`] to
//! [`UniversalRecorder::with_config`](crate::recorder::UniversalRecorder::with_config).

use crate::error::{Result, UrfError};
use crate::event::RecordingMetadata;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the recording engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Directory recording artifacts are written to
    #[serde(default = "default_recordings_dir")]
    pub recordings_dir: PathBuf,

    /// Generator name stamped into session metadata
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Platform tag stamped into session metadata
    #[serde(default = "default_platform")]
    pub platform: String,
}

fn default_recordings_dir() -> PathBuf {
    PathBuf::from("recordings").join("urf")
}

fn default_generator() -> String {
    "URF Recorder".to_string()
}

fn default_platform() -> String {
    std::env::consts::OS.to_string()
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            recordings_dir: default_recordings_dir(),
            generator: default_generator(),
            platform: default_platform(),
        }
    }
}

impl RecorderConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recordings directory
    pub fn with_recordings_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.recordings_dir = dir.into();
        self
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

    /// Session metadata pre-filled from this configuration
    ///
    /// The host adds application info, terminal geometry and stream
    /// declarations on top before starting the session.
    pub fn metadata_for(&self, session_id: impl Into<String>) -> RecordingMetadata {
        RecordingMetadata::new(session_id)
            .with_generator(self.generator.clone())
            .with_platform(self.platform.clone())
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            UrfError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            UrfError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })
    }

    /// Load configuration, returning defaults if any error occurs
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load recorder config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| {
            UrfError::Config(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)
            .map_err(|e| UrfError::Config(format!("Failed to write config file {:?}: {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RecorderConfig::default();
        assert_eq!(config.recordings_dir, PathBuf::from("recordings/urf"));
        assert_eq!(config.generator, "URF Recorder");
        assert!(!config.platform.is_empty());
    }

    #[test]
    fn test_metadata_for_session() {
        let config = RecorderConfig::new()
            .with_generator("Test Generator")
            .with_platform("console");

        let metadata = config.metadata_for("session-1");
        assert_eq!(metadata.id, "session-1");
        assert_eq!(metadata.generator, "Test Generator");
        assert_eq!(metadata.platform, "console");
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recorder.toml");

        let config = RecorderConfig::new()
            .with_recordings_dir(dir.path().join("captures"))
            .with_generator("Roundtrip");
        config.save(&path).unwrap();

        let loaded = RecorderConfig::load(&path).unwrap();
        assert_eq!(loaded.recordings_dir, dir.path().join("captures"));
        assert_eq!(loaded.generator, "Roundtrip");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recorder.toml");
        std::fs::write(&path, "generator = \"Partial\"\n").unwrap();

        let loaded = RecorderConfig::load(&path).unwrap();
        assert_eq!(loaded.generator, "Partial");
        assert_eq!(loaded.recordings_dir, PathBuf::from("recordings/urf"));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = RecorderConfig::load_or_default("does/not/exist.toml");
        assert_eq!(config.generator, "URF Recorder");
    }
}
