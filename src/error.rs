use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum IrefError {
    #[error("failed to read input file {path}: {message}")]
    InputRead { path: PathBuf, message: String },

    #[error("failed to read archive: {0}")]
    Archive(String),

    #[error("TSV error: {0}")]
    Tsv(String),

    #[error("input is missing required columns: {0}")]
    MissingColumns(String),

    #[error("malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("failed to write output file {path}: {message}")]
    OutputWrite { path: PathBuf, message: String },

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid gold standard label: {0}")]
    InvalidGoldStandard(String),
}

impl From<csv::Error> for IrefError {
    fn from(err: csv::Error) -> Self {
        IrefError::Tsv(err.to_string())
    }
}
