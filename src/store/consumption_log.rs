use std::path::{Path, PathBuf};

use super::{append_lines, StoreError, StoreFile, Today};
use crate::models::{FoodEntry, MacroTotals};

const SEPARATOR_LEN: usize = 82;

/// Owns `FoodLog.txt`, a never-truncated record of every commit.
#[derive(Debug, Clone)]
pub struct ConsumptionLog {
    path: PathBuf,
}

impl ConsumptionLog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: StoreFile::FoodLog.path_in(data_dir),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one commit: its stamp, the entries, and the day totals after it.
    pub fn record(
        &self,
        today: &Today,
        entries: &[FoodEntry],
        day_totals: &MacroTotals,
    ) -> Result<(), StoreError> {
        let mut lines = Vec::with_capacity(entries.len() + 4);
        lines.push(format!("Date: {}", today.stamp()));
        lines.extend(entries.iter().map(|e| e.to_string()));
        lines.push("Todays Totals:".to_string());
        lines.push(day_totals.to_string());
        lines.push("-".repeat(SEPARATOR_LEN));
        append_lines(&self.path, &lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_record_appends_block() {
        let temp = TempDir::new().unwrap();
        let log = ConsumptionLog::new(temp.path());
        let today = Today::at(
            NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap(),
        );
        let entry = FoodEntry::quick("Sandwich", MacroTotals::new(450, 22.0, 48.0, 17.0));

        log.record(&today, &[entry.clone()], &MacroTotals::new(950, 60.4, 98.0, 30.0))
            .unwrap();
        log.record(&today, &[entry], &MacroTotals::new(1400, 82.4, 146.0, 47.0))
            .unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Date: Fri Oct 16 12:30:00 2026");
        assert!(lines[1].starts_with("Sandwich"));
        assert_eq!(lines[2], "Todays Totals:");
        assert_eq!(lines[3], "Calories:950  Protein:60  Carbs:98  Fats:30");
        assert_eq!(lines[4], "-".repeat(82));
        assert_eq!(lines[8], "Calories:1400  Protein:82  Carbs:146  Fats:47");
    }
}
