use std::io::{self, Write};

use camino::Utf8Path;
use serde::Serialize;
use tracing::info;

use crate::domain::InteractionRecord;
use crate::error::IrefError;
use crate::pipeline::{ProgressEvent, ProgressSink, RunSummary};
use crate::schema::OUTPUT_COLUMNS;

/// Serializes records as TSV with a header row, even when empty.
pub fn write_tsv<W: Write>(writer: W, records: &[InteractionRecord]) -> Result<(), IrefError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .map_err(|err| IrefError::Tsv(err.to_string()))?;
    Ok(())
}

/// Writes the table to a temporary file next to `path` and renames it into
/// place, so `path` is either the complete table or untouched.
pub fn write_tsv_atomic(path: &Utf8Path, records: &[InteractionRecord]) -> Result<(), IrefError> {
    let write_err = |message: String| IrefError::OutputWrite {
        path: path.as_std_path().to_path_buf(),
        message,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let mut temp = tempfile::Builder::new()
        .prefix(".iref-clean")
        .suffix(".tmp")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| write_err(err.to_string()))?;

    write_tsv(temp.as_file_mut(), records).map_err(|err| write_err(err.to_string()))?;
    temp.as_file()
        .sync_all()
        .map_err(|err| write_err(err.to_string()))?;
    temp.persist(path.as_std_path())
        .map_err(|err| write_err(err.error.to_string()))?;

    info!(path = %path, rows = records.len(), "wrote cleaned table");
    Ok(())
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_summary(summary: &RunSummary) -> io::Result<()> {
        Self::print_json(summary)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

/// Forwards pipeline progress to the `tracing` subscriber.
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn event(&self, event: ProgressEvent) {
        match event.elapsed {
            Some(elapsed) => info!(
                phase = %event.phase,
                elapsed_ms = elapsed.as_millis() as u64,
                "{}",
                event.message
            ),
            None => info!(phase = %event.phase, "{}", event.message),
        }
    }
}
