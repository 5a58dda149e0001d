use std::fmt;
use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::config::ResolvedConfig;
use crate::domain::{GoldStandard, InteractionRecord, RawInteraction};
use crate::error::IrefError;
use crate::expand::{expand_groups, group_complexes, partition};
use crate::filter::{combine, label, retain_informative};
use crate::loader;
use crate::normalize::normalize_all;
use crate::output::write_tsv_atomic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Load,
    Normalize,
    Expand,
    Filter,
    Write,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Load => "Load",
            Phase::Normalize => "Normalize",
            Phase::Expand => "Expand",
            Phase::Filter => "Filter",
            Phase::Write => "Write",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub phase: Phase,
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub rows_read: usize,
    pub ppi_rows: usize,
    pub complex_rows: usize,
    pub complexes: usize,
    pub complex_pairs: usize,
    pub rows_dropped: usize,
    pub rows_written: usize,
}

#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub records: Vec<InteractionRecord>,
    pub stats: CleanStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: String,
    pub output: String,
    #[serde(flatten)]
    pub stats: CleanStats,
    pub finished_at: String,
}

pub struct Pipeline {
    config: ResolvedConfig,
}

impl Pipeline {
    pub fn new(config: ResolvedConfig) -> Self {
        Self { config }
    }

    /// Loads `input`, cleans it and writes the table to `output`. Nothing is
    /// written unless every earlier phase succeeded.
    pub fn run(
        &self,
        input: &Utf8Path,
        output: &Utf8Path,
        sink: &dyn ProgressSink,
    ) -> Result<RunSummary, IrefError> {
        let started = Instant::now();
        sink.event(ProgressEvent {
            phase: Phase::Load,
            message: format!("reading {input}"),
            elapsed: None,
        });
        let rows = loader::load(input)?;

        let outcome = self.clean(rows, sink);

        sink.event(ProgressEvent {
            phase: Phase::Write,
            message: format!("writing {} rows to {output}", outcome.records.len()),
            elapsed: None,
        });
        write_tsv_atomic(output, &outcome.records)?;
        sink.event(ProgressEvent {
            phase: Phase::Write,
            message: "done".to_string(),
            elapsed: Some(started.elapsed()),
        });

        Ok(RunSummary {
            input: input.to_string(),
            output: output.to_string(),
            stats: outcome.stats,
            finished_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// The in-memory part of the run: normalize, expand complexes, combine
    /// and filter.
    pub fn clean(&self, rows: Vec<RawInteraction>, sink: &dyn ProgressSink) -> CleanOutcome {
        let rows_read = rows.len();
        sink.event(ProgressEvent {
            phase: Phase::Normalize,
            message: format!("decoding annotations of {rows_read} rows"),
            elapsed: None,
        });
        let normalized = normalize_all(rows);

        let (complex_rows, plain_rows) = partition(normalized, &self.config.complex_marker);
        let groups = group_complexes(&complex_rows);
        let complexes = groups.len();
        sink.event(ProgressEvent {
            phase: Phase::Expand,
            message: format!(
                "expanding {complexes} complexes from {} rows",
                complex_rows.len()
            ),
            elapsed: None,
        });
        let pairs = expand_groups(&groups, self.config.representative);
        let complex_pairs = pairs.len();
        let ppi_rows = plain_rows.len();

        let combined = combine(label(plain_rows, GoldStandard::Ppi), pairs);
        sink.event(ProgressEvent {
            phase: Phase::Filter,
            message: format!("filtering {} rows", combined.len()),
            elapsed: None,
        });
        let filtered = retain_informative(combined, &self.config.sentinels);

        CleanOutcome {
            stats: CleanStats {
                rows_read,
                ppi_rows,
                complex_rows: complex_rows.len(),
                complexes,
                complex_pairs,
                rows_dropped: filtered.dropped,
                rows_written: filtered.kept.len(),
            },
            records: filtered.kept,
        }
    }
}

/// Output path used when none is given on the command line.
pub fn default_output_path() -> Utf8PathBuf {
    Utf8PathBuf::from("Clean_iRefIndex.tsv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_json_flattens_stats() {
        let summary = RunSummary {
            input: "10090.mitab.txt".to_string(),
            output: "Clean_iRefIndex.tsv".to_string(),
            stats: CleanStats {
                rows_read: 8,
                ppi_rows: 4,
                complex_rows: 4,
                complexes: 2,
                complex_pairs: 3,
                rows_dropped: 3,
                rows_written: 4,
            },
            finished_at: "2026-10-19T00:00:00+00:00".to_string(),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["rows_written"], 4);
        assert_eq!(value["complex_pairs"], 3);
        assert_eq!(value["input"], "10090.mitab.txt");
        assert_eq!(value["finished_at"], "2026-10-19T00:00:00+00:00");
        assert!(value.get("stats").is_none());
    }
}
