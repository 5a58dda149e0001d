use std::fs::File;
use std::io::{BufReader, Read};

use camino::Utf8Path;
use flate2::read::MultiGzDecoder;
use tracing::{debug, info};
use zip::ZipArchive;

use crate::domain::RawInteraction;
use crate::error::IrefError;
use crate::schema::{COLUMNS, ColumnIndex};

/// Reads an iRefIndex MITAB file. `.gz` files and `.zip` archives are
/// decompressed transparently; any other extension is read as plain text.
pub fn load(path: &Utf8Path) -> Result<Vec<RawInteraction>, IrefError> {
    let rows = match path.extension() {
        Some("gz") => {
            let file = open(path)?;
            parse_table(MultiGzDecoder::new(BufReader::new(file)), Some(path))?
        }
        Some("zip") => parse_table(read_first_zip_entry(path)?.as_slice(), Some(path))?,
        _ => parse_table(BufReader::new(open(path)?), Some(path))?,
    };
    info!(path = %path, rows = rows.len(), "loaded interaction table");
    Ok(rows)
}

/// Parses tab-separated MITAB text. Quoting is disabled because annotation
/// cells carry literal quotes (`psi-mi:"MI:0407"(direct interaction)`).
pub fn read_table<R: Read>(reader: R) -> Result<Vec<RawInteraction>, IrefError> {
    parse_table(reader, None)
}

// Only the required cells are decoded as UTF-8; other columns may carry any bytes.
fn parse_table<R: Read>(
    reader: R,
    path: Option<&Utf8Path>,
) -> Result<Vec<RawInteraction>, IrefError> {
    let csv_err = |err: csv::Error| match path {
        Some(path) if err.is_io_error() => IrefError::InputRead {
            path: path.as_std_path().to_path_buf(),
            message: err.to_string(),
        },
        _ => IrefError::from(err),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let index = ColumnIndex::resolve(reader.byte_headers().map_err(csv_err)?)?;
    debug!(?index, "resolved input columns");

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(csv_err)?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        if record.len() <= index.max_position() {
            return Err(IrefError::MalformedRow {
                line,
                message: format!(
                    "expected at least {} fields, found {}",
                    index.max_position() + 1,
                    record.len()
                ),
            });
        }
        let cell = |slot: usize| -> Result<String, IrefError> {
            let bytes = &record[index.position(slot)];
            std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|err| IrefError::MalformedRow {
                    line,
                    message: format!("column {}: {err}", COLUMNS[slot].source),
                })
        };
        rows.push(RawInteraction {
            uid_a: cell(0)?,
            uid_b: cell(1)?,
            interaction_type: cell(2)?,
            method: cell(3)?,
            host_organism_taxid: cell(4)?,
        });
    }
    Ok(rows)
}

fn open(path: &Utf8Path) -> Result<File, IrefError> {
    File::open(path.as_std_path()).map_err(|err| IrefError::InputRead {
        path: path.as_std_path().to_path_buf(),
        message: err.to_string(),
    })
}

fn read_first_zip_entry(path: &Utf8Path) -> Result<Vec<u8>, IrefError> {
    let file = open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|err| IrefError::Archive(err.to_string()))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|err| IrefError::Archive(err.to_string()))?;
        if entry.is_dir() {
            continue;
        }
        debug!(entry = entry.name(), "reading archive entry");
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|err| IrefError::InputRead {
                path: path.as_std_path().to_path_buf(),
                message: err.to_string(),
            })?;
        return Ok(content);
    }
    Err(IrefError::Archive(format!("{path} contains no files")))
}
