//! Main analysis pipeline for a single recording.
//!
//! Opens the recording, streams every line through a [`StatsAggregator`] and
//! returns an [`AnalysisResult`] ready for the report formatter.

use std::path::Path;

use acmi_core::error::Result;
use acmi_core::models::AggregateStats;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::{PassCounts, StatsAggregator};
use crate::reader::RecordingSource;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the aggregate tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this result was generated.
    pub generated_at: String,
    /// Path of the recording as given.
    pub source: String,
    /// Archive member that was read, when the recording was zipped.
    pub archive_member: Option<String>,
    /// Line bookkeeping for the pass.
    #[serde(flatten)]
    pub counts: PassCounts,
    /// Distinct objects seen.
    pub objects_tracked: usize,
    /// Wall-clock seconds spent reading and aggregating.
    pub parse_time_seconds: f64,
}

/// The complete output of [`analyze_recording`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub stats: AggregateStats,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run one full pass over the recording at `path`.
///
/// Only failures of the input itself (missing file, unreadable archive, I/O
/// errors while reading) are returned as errors; the file is closed before
/// this function returns on every path.
pub fn analyze_recording(path: &Path) -> Result<AnalysisResult> {
    let start = std::time::Instant::now();

    let mut source = RecordingSource::open(path)?;
    let mut aggregator = StatsAggregator::new();
    for line in source.lines()? {
        aggregator.process_line(&line?);
    }

    let counts = aggregator.counts();
    let objects_tracked = aggregator.registry().len();
    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: path.display().to_string(),
        archive_member: source.member_name().map(str::to_string),
        counts,
        objects_tracked,
        parse_time_seconds: start.elapsed().as_secs_f64(),
    };

    debug!(
        "Recording {}: {} lines, {} objects, {}/{} events applied",
        metadata.source,
        counts.lines_read,
        objects_tracked,
        counts.events_applied,
        counts.event_lines,
    );

    Ok(AnalysisResult {
        stats: aggregator.finish(),
        metadata,
    })
}

/// Aggregate an in-memory sequence of lines.
pub fn analyze_lines<I, S>(lines: I) -> AggregateStats
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = StatsAggregator::new();
    for line in lines {
        aggregator.process_line(line.as_ref());
    }
    aggregator.finish()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
