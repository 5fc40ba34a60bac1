use std::path::PathBuf;

use directories::BaseDirs;

/// A single recorded evaluation.
pub mod entry;
/// The file-backed history store.
///
/// Records are kept in a plain-text file, three lines per entry: the
/// expression, the result in plain notation, and a blank separator.
pub mod storage;

pub use entry::HistoryEntry;
pub use storage::History;

/// Where the history file lives unless the caller chooses another path.
///
/// Resolves to `<data dir>/decalc/history.txt`, for example
/// `~/.local/share/decalc/history.txt` on Linux. Falls back to
/// `storage/history.txt` relative to the working directory when no home
/// directory can be determined.
#[must_use]
pub fn default_path() -> PathBuf {
    BaseDirs::new().map_or_else(|| PathBuf::from("storage").join("history.txt"),
                                |dirs| dirs.data_dir().join("decalc").join("history.txt"))
}
