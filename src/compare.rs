//! Recording comparison for regression testing
//!
//! This module scores an "actual" recording against a "golden" reference
//! and reports how similar they are.
//!
//! # Scoring
//!
//! [`RecordingComparer::compare`] computes up to four sub-scores, each in
//! `[0, 1]`, and averages whichever were active:
//!
//! 1. **Counts** - per-discriminator event counts, within
//!    [`ComparisonOptions::event_count_tolerance`] of golden
//! 2. **Duration** - total duration within
//!    [`ComparisonOptions::duration_tolerance`] of golden
//! 3. **Metadata** - platform and terminal geometry (only when
//!    [`ComparisonOptions::ignore_metadata_variations`] is off)
//! 4. **Structure** - longest common subsequence over the discriminator
//!    sequences (skipped when
//!    [`ComparisonOptions::compare_structure_only`] is on)
//!
//! Recordings are considered equivalent at a similarity of 0.9 or above.
//! Comparison never fails: empty recordings and zero denominators score
//! with defensive defaults, and the result always carries the raw counts
//! and durations of both sides for introspection.
//!
//! # Example
//!
//! ```
//! use urf_rs::compare::RecordingComparer;
//! use urf_rs::reader::Recording;
//!
//! let golden = Recording::from_events(Vec::new());
//! let actual = Recording::from_events(Vec::new());
//!
//! let comparison = RecordingComparer::default().compare(&actual, &golden);
//! assert!(comparison.is_equivalent);
//! assert_eq!(comparison.similarity_score, 1.0);
//! ```

use crate::event::{MetadataEvent, RecordingEvent};
use crate::reader::Recording;
use std::collections::{BTreeMap, BTreeSet};

/// Similarity at or above which two recordings count as equivalent
const EQUIVALENCE_THRESHOLD: f64 = 0.9;

/// Sequence similarity below which a structure difference is flagged
const SEQUENCE_FLAG_THRESHOLD: f64 = 0.9;

/// Partial credit for an event type present in actual but not in golden
const NEW_TYPE_CREDIT: f64 = 0.5;

/// Options for comparing recordings
#[derive(Debug, Clone)]
pub struct ComparisonOptions {
    /// Tolerance for timestamp differences in seconds
    ///
    /// Currently unused by scoring; reserved for per-event alignment.
    pub timestamp_tolerance: f64,

    /// Tolerance for event count differences, as a fraction of golden's
    /// count (0-1)
    pub event_count_tolerance: f64,

    /// Tolerance for duration differences, as a fraction of golden's
    /// duration (0-1)
    pub duration_tolerance: f64,

    /// Ignore minor differences in metadata (e.g. timestamps, ids)
    pub ignore_metadata_variations: bool,

    /// Compare only event types and counts, not content
    pub compare_structure_only: bool,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            timestamp_tolerance: 0.1,
            event_count_tolerance: 0.1,
            duration_tolerance: 0.15,
            ignore_metadata_variations: true,
            compare_structure_only: false,
        }
    }
}

/// Result of comparing two recordings
#[derive(Debug, Clone)]
pub struct RecordingComparison {
    /// Whether the recordings are equivalent (similarity >= 0.9)
    pub is_equivalent: bool,

    /// Overall similarity in `[0, 1]`
    pub similarity_score: f64,

    /// Human-readable differences, in the order the sub-scores ran
    pub differences: Vec<String>,

    /// Per-discriminator counts of the actual recording
    pub actual_event_counts: BTreeMap<String, usize>,

    /// Per-discriminator counts of the golden recording
    pub golden_event_counts: BTreeMap<String, usize>,

    /// Duration of the actual recording in seconds
    pub actual_duration: f64,

    /// Duration of the golden recording in seconds
    pub golden_duration: f64,
}

impl RecordingComparison {
    /// One-line verdict, with the differences appended when the
    /// recordings are not equivalent
    pub fn summary(&self) -> String {
        if self.is_equivalent {
            format!(
                "Recordings are equivalent (similarity: {:.1}%)",
                self.similarity_score * 100.0
            )
        } else {
            let mut summary = format!(
                "Recordings differ (similarity: {:.1}%)",
                self.similarity_score * 100.0
            );
            for difference in &self.differences {
                summary.push('\n');
                summary.push_str(difference);
            }
            summary
        }
    }
}

/// Compares recordings against golden references
#[derive(Debug, Clone, Default)]
pub struct RecordingComparer {
    options: ComparisonOptions,
}

impl RecordingComparer {
    /// Create a comparer with the given options
    pub fn new(options: ComparisonOptions) -> Self {
        Self { options }
    }

    /// The active comparison options
    pub fn options(&self) -> &ComparisonOptions {
        &self.options
    }

    /// Compare an actual recording against a golden reference
    ///
    /// Never fails; always returns a fully populated result.
    pub fn compare(&self, actual: &Recording, golden: &Recording) -> RecordingComparison {
        let mut differences = Vec::new();
        let mut scores = Vec::new();

        let actual_counts = actual.event_counts();
        let golden_counts = golden.event_counts();
        scores.push(self.compare_event_counts(&actual_counts, &golden_counts, &mut differences));

        let actual_duration = actual.duration();
        let golden_duration = golden.duration();
        scores.push(self.compare_durations(actual_duration, golden_duration, &mut differences));

        if !self.options.ignore_metadata_variations {
            scores.push(self.compare_metadata(
                actual.metadata(),
                golden.metadata(),
                &mut differences,
            ));
        }

        if !self.options.compare_structure_only {
            scores.push(self.compare_structure(actual, golden, &mut differences));
        }

        let similarity_score = scores.iter().sum::<f64>() / scores.len() as f64;

        RecordingComparison {
            is_equivalent: similarity_score >= EQUIVALENCE_THRESHOLD,
            similarity_score,
            differences,
            actual_event_counts: actual_counts,
            golden_event_counts: golden_counts,
            actual_duration,
            golden_duration,
        }
    }

    /// Score per-discriminator event counts over the union of observed
    /// discriminators
    fn compare_event_counts(
        &self,
        actual: &BTreeMap<String, usize>,
        golden: &BTreeMap<String, usize>,
        differences: &mut Vec<String>,
    ) -> f64 {
        let all_types: BTreeSet<&String> = actual.keys().chain(golden.keys()).collect();
        let mut scores = Vec::new();

        for kind in all_types {
            let actual_count = actual.get(kind).copied().unwrap_or(0);
            let golden_count = golden.get(kind).copied().unwrap_or(0);

            if golden_count == 0 && actual_count > 0 {
                differences.push(format!(
                    "New event type '{}': {} events (not in golden)",
                    kind, actual_count
                ));
                scores.push(NEW_TYPE_CREDIT);
                continue;
            }

            if actual_count == 0 && golden_count > 0 {
                differences.push(format!(
                    "Missing event type '{}': expected {} events",
                    kind, golden_count
                ));
                scores.push(0.0);
                continue;
            }

            let difference = actual_count.abs_diff(golden_count) as f64;
            let tolerance = golden_count as f64 * self.options.event_count_tolerance;

            if difference > tolerance {
                differences.push(format!(
                    "Event count mismatch for '{}': expected ~{}, got {}",
                    kind, golden_count, actual_count
                ));
                scores.push((1.0 - difference / golden_count as f64).max(0.0));
            } else {
                scores.push(1.0);
            }
        }

        mean_or_perfect(&scores)
    }

    /// Score total durations
    fn compare_durations(&self, actual: f64, golden: f64, differences: &mut Vec<String>) -> f64 {
        if golden == 0.0 {
            return 1.0; // Can't compare zero duration
        }

        let difference = (actual - golden).abs();
        let tolerance = golden * self.options.duration_tolerance;

        if difference > tolerance {
            differences.push(format!(
                "Duration mismatch: expected ~{:.2}s, got {:.2}s (diff: {:.2}s)",
                golden, actual, difference
            ));
            return (1.0 - difference / golden).max(0.0);
        }

        1.0
    }

    /// Score session metadata: platform equality, and terminal geometry
    /// when both sides declare it
    fn compare_metadata(
        &self,
        actual: Option<&MetadataEvent>,
        golden: Option<&MetadataEvent>,
        differences: &mut Vec<String>,
    ) -> f64 {
        let (actual, golden) = match (actual, golden) {
            (None, None) => return 1.0,
            (Some(a), Some(g)) => (a, g),
            _ => {
                differences.push("Metadata presence mismatch".to_string());
                return 0.0;
            }
        };

        let mut scores = Vec::new();

        if actual.recording.platform != golden.recording.platform {
            differences.push(format!(
                "Platform mismatch: expected '{}', got '{}'",
                golden.recording.platform, actual.recording.platform
            ));
            scores.push(0.0);
        } else {
            scores.push(1.0);
        }

        if let (Some(actual_term), Some(golden_term)) =
            (&actual.recording.terminal, &golden.recording.terminal)
        {
            if actual_term.width != golden_term.width || actual_term.height != golden_term.height {
                differences.push(format!(
                    "Terminal dimensions mismatch: expected {}x{}, got {}x{}",
                    golden_term.width, golden_term.height, actual_term.width, actual_term.height
                ));
                scores.push(0.5);
            } else {
                scores.push(1.0);
            }
        }

        mean_or_perfect(&scores)
    }

    /// Score the discriminator sequences via longest common subsequence
    fn compare_structure(
        &self,
        actual: &Recording,
        golden: &Recording,
        differences: &mut Vec<String>,
    ) -> f64 {
        let actual_sequence: Vec<&str> = actual
            .iter()
            .map(|e: &RecordingEvent| e.kind().as_str())
            .collect();
        let golden_sequence: Vec<&str> = golden
            .iter()
            .map(|e: &RecordingEvent| e.kind().as_str())
            .collect();

        let lcs = longest_common_subsequence(&actual_sequence, &golden_sequence);
        let max_length = actual_sequence.len().max(golden_sequence.len());
        let similarity = if max_length > 0 {
            lcs as f64 / max_length as f64
        } else {
            1.0
        };

        if similarity < SEQUENCE_FLAG_THRESHOLD {
            differences.push(format!(
                "Event sequence differs (similarity: {:.1}%)",
                similarity * 100.0
            ));
        }

        similarity
    }
}

fn mean_or_perfect(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        1.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Longest common subsequence length, classic O(n*m) dynamic programming
///
/// Fine for the hundreds-to-low-thousands event counts recordings have in
/// practice; a banded or linear-space variant would be a drop-in for
/// callers comparing very long recordings.
fn longest_common_subsequence(a: &[&str], b: &[&str]) -> usize {
    let (m, n) = (a.len(), b.len());
    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    dp[m][n]
}
