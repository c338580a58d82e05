use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the vacancy statistics pipeline.
#[derive(Error, Debug)]
pub enum VacstatError {
    /// The input file name is empty or carries no extension.
    #[error("Invalid input file name: {0:?}")]
    InvalidFileName(String),

    /// The target profession string is empty.
    #[error("Profession name must not be empty")]
    EmptyProfession,

    /// The input file contains no rows at all, not even a header.
    #[error("Input file is empty: {0}")]
    EmptyFile(PathBuf),

    /// No records survived filtering and normalization.
    #[error("No usable vacancy records in the input")]
    EmptyDataset,

    /// A raw row could not be converted into a typed record.
    ///
    /// Never fatal: callers drop the offending row and continue.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A currency code with no entry in the conversion table.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A parser-level CSV failure.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A report artifact could not be written.
    #[error("Failed to render report: {0}")]
    Report(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the vacstat crates.
pub type Result<T> = std::result::Result<T, VacstatError>;
