use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city CSV could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from a city CSV header.
    #[error("Missing column \"{column}\" in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A timestamp cell did not match any recognised format.
    #[error("Invalid timestamp at line {line}, column \"{column}\": {value:?}")]
    TimestampParse {
        line: u64,
        column: String,
        value: String,
    },

    /// A filter value is not part of its vocabulary.
    #[error("Invalid {kind} selection: {value}")]
    InvalidSelection { kind: &'static str, value: String },

    /// Standard input reached end-of-file while a prompt was waiting.
    #[error("Input closed before a valid answer was given")]
    InputClosed,

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
