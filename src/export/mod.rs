//! Exporting recordings to foreign replay formats
//!
//! This module provides a common trait for all recording exporters,
//! enabling the shipped asciicast transcoder and host-provided formats
//! (video, custom players) to be used interchangeably.

mod asciinema;

pub use asciinema::AsciinemaExporter;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Unified interface for recording exporters
///
/// An exporter transcodes a recording artifact into some foreign replay
/// format. Implementations must be `Send` to allow export jobs to run on
/// worker threads.
///
/// # Example
///
/// ```ignore
/// fn export_with(exporter: &dyn RecordingExporter, source: &Path, out_dir: &Path) -> Result<PathBuf> {
///     let output = out_dir.join(format!("replay{}", exporter.file_extension()));
///     exporter.export(source, &output)
/// }
/// ```
pub trait RecordingExporter: Send {
    /// Format name (e.g. "asciinema")
    fn format_name(&self) -> &str;

    /// File extension including the leading dot (e.g. ".cast")
    fn file_extension(&self) -> &str;

    /// Export a recording artifact to the target format
    ///
    /// Returns the path of the written output artifact.
    fn export(&self, source: &Path, output: &Path) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal exporter used to exercise trait-object substitution
    struct NullExporter;

    impl RecordingExporter for NullExporter {
        fn format_name(&self) -> &str {
            "null"
        }

        fn file_extension(&self) -> &str {
            ".null"
        }

        fn export(&self, _source: &Path, output: &Path) -> Result<PathBuf> {
            std::fs::write(output, b"")?;
            Ok(output.to_path_buf())
        }
    }

    #[test]
    fn test_exporters_are_substitutable() {
        let exporters: Vec<Box<dyn RecordingExporter>> =
            vec![Box::new(NullExporter), Box::new(AsciinemaExporter)];

        let names: Vec<&str> = exporters.iter().map(|e| e.format_name()).collect();
        assert_eq!(names, vec!["null", "asciinema"]);

        let extensions: Vec<&str> = exporters.iter().map(|e| e.file_extension()).collect();
        assert_eq!(extensions, vec![".null", ".cast"]);
    }

    #[test]
    fn test_trait_object_export() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.null");

        let exporter: Box<dyn RecordingExporter> = Box::new(NullExporter);
        let path = exporter.export(Path::new("unused"), &output).unwrap();
        assert_eq!(path, output);
        assert!(output.exists());
    }
}
