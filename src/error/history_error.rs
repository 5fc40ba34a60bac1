use std::{io, path::PathBuf};

use thiserror::Error;

/// Represents all errors raised by the history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Reading, writing or removing the history file failed.
    #[error("history file {}: {source}", path.display())]
    Io {
        /// The history file path.
        path:   PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A stored record does not follow the three-line record format.
    #[error("malformed history record on line {line}: {reason}")]
    Malformed {
        /// One-based line number in the history file.
        line:   usize,
        /// What was wrong with the record.
        reason: String,
    },
}
