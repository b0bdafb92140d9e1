//! Calculation history
//!
//! An ordered, in-memory log of past calculations with optional
//! file persistence. The in-memory state is authoritative: auto-save
//! failures are logged and never propagated.

pub mod csv;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

/// A single recorded calculation. Immutable once created; identified
/// only by its position in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub operation: String,
    pub expression: String,
    pub result: String,
}

/// Errors from history persistence.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history file not found: {0}")]
    NotFound(PathBuf),

    #[error("history file missing required columns: {0}")]
    MissingColumns(String),

    #[error("malformed history file at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Append-ordered log of calculation records.
///
/// When an auto-save path is configured, every mutating operation writes
/// the full log back to that path.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
    autosave_path: Option<PathBuf>,
}

impl HistoryLog {
    /// Create an empty log with no persistence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure (or clear) the auto-save path.
    pub fn set_autosave_path(
        &mut self,
        path: Option<PathBuf>,
    ) {
        self.autosave_path = path;
    }

    /// Append a record at the end of the log.
    pub fn append(
        &mut self,
        operation: &str,
        expression: &str,
        result: &str,
    ) {
        self.records.push(HistoryRecord {
            operation: operation.to_string(),
            expression: expression.to_string(),
            result: result.to_string(),
        });
        debug!("history: appended {} = {}", expression, result);
        self.autosave();
    }

    /// Snapshot of all records; mutating the returned vector does not
    /// affect the log.
    pub fn list(&self) -> Vec<HistoryRecord> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Remove the record at `index`, shifting later records down.
    /// Returns false when the index is out of range.
    pub fn delete_at(
        &mut self,
        index: usize,
    ) -> bool {
        if index >= self.records.len() {
            warn!("history: delete index {} out of range", index);
            return false;
        }
        self.records.remove(index);
        info!("history: deleted entry at index {}", index);
        self.autosave();
        true
    }

    /// Empty the log.
    pub fn clear(&mut self) {
        self.records.clear();
        info!("history: cleared");
        self.autosave();
    }

    /// Replace the entire log atomically.
    pub fn replace_all(
        &mut self,
        records: Vec<HistoryRecord>,
    ) {
        info!("history: replaced with {} records", records.len());
        self.records = records;
        self.autosave();
    }

    /// Serialize the full log to a CSV file, creating parent directories
    /// as needed.
    pub fn save_to(
        &self,
        path: &Path,
    ) -> Result<(), HistoryError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|source| HistoryError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
        }

        fs::write(path, csv::encode(&self.records)).map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("history: saved {} records to {}", self.records.len(), path.display());
        Ok(())
    }

    /// Load the log from a CSV file, replacing current contents.
    /// Prior state is retained on failure. Returns the record count.
    pub fn load_from(
        &mut self,
        path: &Path,
    ) -> Result<usize, HistoryError> {
        if !path.exists() {
            return Err(HistoryError::NotFound(path.to_path_buf()));
        }

        let text = fs::read_to_string(path).map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records = csv::decode(&text)?;
        let count = records.len();
        self.records = records;
        info!("history: loaded {} records from {}", count, path.display());
        Ok(count)
    }

    /// Write the log to the configured auto-save path, if any.
    /// Failures are logged, not propagated.
    fn autosave(&self) {
        if let Some(path) = &self.autosave_path {
            if let Err(err) = self.save_to(path) {
                warn!("failed to auto-save history to {}: {}", path.display(), err);
            }
        }
    }
}
