//! Append-only log of finished days.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{append_lines, read_lines, DailyLedger, StoreError, StoreFile, Today, DATE_PREFIX};
use crate::models::{MacroTotals, ParseTotalsError};

/// A date line and a totals line, kept exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub date_line: String,
    pub totals_line: String,
}

impl HistoryRecord {
    /// The timestamp after `Date-`, if the date line has that prefix.
    pub fn stamp(&self) -> Option<&str> {
        self.date_line.strip_prefix(DATE_PREFIX).map(str::trim_end)
    }

    pub fn totals(&self) -> Result<MacroTotals, ParseTotalsError> {
        self.totals_line.parse()
    }
}

/// Mean daily totals across the archived days that could be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryAverages {
    pub days: usize,
    pub skipped: usize,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl HistoryAverages {
    /// Returns `None` when no record has readable totals.
    pub fn from_records(records: &[HistoryRecord]) -> Option<Self> {
        let mut calories: i128 = 0;
        let mut sum = MacroTotals::zero();
        let mut days = 0;
        let mut skipped = 0;

        for record in records {
            match record.totals() {
                Ok(totals) => {
                    calories += i128::from(totals.calories);
                    sum += MacroTotals { calories: 0, ..totals };
                    days += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping history entry '{}': {}", record.date_line, e);
                    skipped += 1;
                }
            }
        }

        if days == 0 {
            return None;
        }
        let n = days as f64;
        Some(Self {
            days,
            skipped,
            calories: calories as f64 / n,
            protein: sum.protein / n,
            carbs: sum.carbs / n,
            fat: sum.fat / n,
        })
    }
}

/// Owns `MacrosLog.txt`.
#[derive(Debug, Clone)]
pub struct HistoryArchiver {
    path: PathBuf,
}

impl HistoryArchiver {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: StoreFile::MacrosLog.path_in(data_dir),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copies the ledger's snapshot to the end of the history when it belongs
    /// to an earlier day. Must run before anything commits to the ledger.
    ///
    /// Returns whether a record was appended. A snapshot that is already the
    /// last history record is not appended again.
    pub fn archive_if_rollover(
        &self,
        ledger: &DailyLedger,
        today: &Today,
    ) -> Result<bool, StoreError> {
        let record = match ledger.read_raw()? {
            Some(record) => record,
            None => return Ok(false),
        };

        if today.is_today(ledger.stamp_of(&record)?) {
            return Ok(false);
        }

        if self.load_history()?.last() == Some(&record) {
            tracing::debug!("'{}' is already archived", record.date_line);
            return Ok(false);
        }

        append_lines(
            &self.path,
            &[record.date_line.clone(), record.totals_line.clone()],
        )?;
        tracing::info!("Archived day {}", record.date_line);
        Ok(true)
    }

    /// Every archived day, oldest first. A trailing unpaired line is ignored.
    pub fn load_history(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let lines = match read_lines(&self.path)? {
            Some(lines) => lines,
            None => return Ok(Vec::new()),
        };

        if lines.len() % 2 == 1 {
            tracing::warn!(
                "Ignoring unpaired last line of {}",
                self.path.display()
            );
        }

        let mut lines = lines.into_iter();
        let mut records = Vec::new();
        while let (Some(date_line), Some(totals_line)) = (lines.next(), lines.next()) {
            records.push(HistoryRecord {
                date_line,
                totals_line,
            });
        }
        Ok(records)
    }

    /// Display lines: each date line followed by its totals line.
    pub fn render(history: &[HistoryRecord]) -> Vec<String> {
        history
            .iter()
            .flat_map(|r| [r.date_line.clone(), r.totals_line.clone()])
            .collect()
    }
}
