use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use bigdecimal::BigDecimal;

use crate::{error::HistoryError, history::entry::HistoryEntry};

/// The history file and the entries loaded from it.
///
/// # Example
/// ```
/// use decalc::{BigDecimal, history::History};
///
/// let dir = std::env::temp_dir().join(format!("decalc-doc-{}", std::process::id()));
/// let mut history = History::load(dir.join("history.txt")).unwrap();
/// history.append("6 * 7", BigDecimal::from(42)).unwrap();
///
/// let reloaded = History::load(history.path()).unwrap();
/// assert_eq!(reloaded.entries()[0].expression(), "6 * 7");
///
/// history.clear().unwrap();
/// assert!(History::load(history.path()).unwrap().entries().is_empty());
/// # std::fs::remove_dir_all(dir).ok();
/// ```
#[derive(Debug, Clone)]
pub struct History {
    path:    PathBuf,
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Reads the history stored at `path`.
    ///
    /// # Returns
    /// The stored entries in insertion order; an empty history if the file
    /// does not exist yet.
    ///
    /// # Errors
    /// - [`HistoryError::Io`] if the file exists but cannot be read.
    /// - [`HistoryError::Malformed`] if a record is incomplete or its result
    ///   is not a decimal.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => parse_records(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no history file yet");
                Vec::new()
            },
            Err(source) => return Err(HistoryError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), count = entries.len(), "loaded history");
        Ok(Self { path, entries })
    }

    /// Records one evaluation, both in memory and at the end of the file.
    ///
    /// Parent directories are created as needed.
    pub fn append(&mut self, expression: &str, result: BigDecimal) -> Result<(), HistoryError> {
        let entry = HistoryEntry::new(expression, result);

        self.ensure_parent()?;
        let mut file = OpenOptions::new().create(true)
                                         .append(true)
                                         .open(&self.path)
                                         .map_err(|source| self.io_error(source))?;
        file.write_all(entry.to_record().as_bytes())
            .map_err(|source| self.io_error(source))?;

        self.entries.push(entry);
        Ok(())
    }

    /// Rewrites the file from the entries held in memory.
    pub fn save(&self) -> Result<(), HistoryError> {
        self.ensure_parent()?;
        let text: String = self.entries.iter().map(HistoryEntry::to_record).collect();
        fs::write(&self.path, text).map_err(|source| self.io_error(source))
    }

    /// Removes every entry and deletes the file.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<(), HistoryError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))
            },
            _ => Ok(()),
        }
    }

    fn io_error(&self, source: io::Error) -> HistoryError {
        tracing::warn!(path = %self.path.display(), %source, "history file access failed");
        HistoryError::Io { path: self.path.clone(),
                           source }
    }
}

/// Parses the three-line record format.
///
/// A missing separator after the final record is accepted.
fn parse_records(text: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
    let mut entries = Vec::new();
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

    while let Some((line, expression)) = lines.next() {
        if expression.trim().is_empty() {
            return Err(HistoryError::Malformed { line,
                                                 reason: "expected an expression".to_string() });
        }

        let Some((line, result)) = lines.next() else {
            return Err(HistoryError::Malformed { line:   line + 1,
                                                 reason: "missing result".to_string(), });
        };
        let result = BigDecimal::from_str(result.trim()).map_err(|_| HistoryError::Malformed {
                                                            line,
                                                            reason: format!("'{result}' is not a decimal"),
                                                        })?;

        if let Some((line, separator)) = lines.next()
           && !separator.is_empty()
        {
            return Err(HistoryError::Malformed { line,
                                                 reason: "expected a blank line between records".to_string() });
        }

        entries.push(HistoryEntry::new(expression, result));
    }
    Ok(entries)
}
