use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Everything that can stop a run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned {status}")]
    Status { url: String, status: StatusCode },

    /// The listing (after date bounds) contained no daily report files.
    #[error("no source files found at {0}")]
    NotFound(String),

    #[error("malformed directory listing from {url}: {source}")]
    Listing {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file} has {columns} columns; no known layout matches")]
    UnsupportedLayout { file: String, columns: usize },

    /// The output has data rows but the last `Date` cell is not a date,
    /// so there is no safe point to resume from.
    #[error("cannot resume {path:?}: last Date cell {value:?} is not a date")]
    UnreadableDate { path: PathBuf, value: String },

    #[error("invalid region identifier {0:?}")]
    InvalidRegion(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error on {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ScrapeError {
    /// Transport and HTTP status failures.
    pub fn is_network(&self) -> bool {
        matches!(self, ScrapeError::Network { .. } | ScrapeError::Status { .. })
    }
}

/// A row that was skipped. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct ParseWarning {
    pub line: u64,
    pub reason: String,
}
