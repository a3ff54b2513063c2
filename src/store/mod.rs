//! Flat-file stores kept in the data directory.
//!
//! ```text
//! <DATA_DIR>/
//!   DayTotals.txt   current day snapshot (DailyLedger)
//!   MacrosLog.txt   finished days (HistoryArchiver)
//!   DayFoods.txt    today's entries (DayFoodJournal)
//!   FoodLog.txt     every commit ever made (ConsumptionLog)
//!   FoodData.csv    food dictionary (FoodDictionary)
//! ```
//!
//! Each file has exactly one owning component. Files are opened, read or
//! written, and closed within a single operation.

mod consumption_log;
mod dictionary;
mod history;
mod journal;
mod ledger;
mod today;

pub use consumption_log::ConsumptionLog;
pub use dictionary::{FoodDictionary, SortKey};
pub use history::{HistoryArchiver, HistoryAverages, HistoryRecord};
pub use journal::DayFoodJournal;
pub use ledger::DailyLedger;
pub use today::Today;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Prefix of every stored date line.
pub const DATE_PREFIX: &str = "Date-";

/// The files kept in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFile {
    DayTotals,
    MacrosLog,
    DayFoods,
    FoodLog,
    FoodData,
}

impl StoreFile {
    pub fn filename(&self) -> &'static str {
        match self {
            StoreFile::DayTotals => "DayTotals.txt",
            StoreFile::MacrosLog => "MacrosLog.txt",
            StoreFile::DayFoods => "DayFoods.txt",
            StoreFile::FoodLog => "FoodLog.txt",
            StoreFile::FoodData => "FoodData.csv",
        }
    }

    pub fn path_in(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.filename())
    }
}

/// Errors raised at the store boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record in {} line {line}: {reason}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Food dictionary error for {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        StoreError::MalformedRecord {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    /// Whether stored content, rather than the filesystem, caused the error.
    #[cfg(test)]
    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::MalformedRecord { .. })
    }
}

/// Reads every line of a file. Returns `Ok(None)` if the file doesn't exist.
fn read_lines(path: &Path) -> Result<Option<Vec<String>>, StoreError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents.lines().map(str::to_string).collect())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Replaces the file with the given lines, creating parent directories.
fn write_lines(path: &Path, lines: &[String]) -> Result<(), StoreError> {
    ensure_parent(path)?;
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    fs::write(path, contents).map_err(|e| StoreError::io(path, e))
}

/// Appends lines to the end of the file, creating it if needed.
fn append_lines(path: &Path, lines: &[String]) -> Result<(), StoreError> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;
    for line in lines {
        writeln!(file, "{}", line).map_err(|e| StoreError::io(path, e))?;
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    Ok(())
}
