//! Human-readable list of everything eaten today.

use std::path::{Path, PathBuf};

use super::{append_lines, read_lines, write_lines, StoreError, StoreFile, Today, DATE_PREFIX};
use crate::models::FoodEntry;

const SEPARATOR_LEN: usize = 57;

/// Owns `DayFoods.txt`.
///
/// The first line is `Date-<stamp>` for the day the file was started, then a
/// dashed separator, then one line per entry.
#[derive(Debug, Clone)]
pub struct DayFoodJournal {
    path: PathBuf,
}

impl DayFoodJournal {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: StoreFile::DayFoods.path_in(data_dir),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the journal was started today. A missing journal, or one whose
    /// header is not a date line, is not current.
    pub fn is_current(&self, today: &Today) -> Result<bool, StoreError> {
        let header = match read_lines(&self.path)? {
            Some(lines) => lines.into_iter().next(),
            None => None,
        };

        Ok(header
            .as_deref()
            .and_then(|line| line.strip_prefix(DATE_PREFIX))
            .map(|stamp| today.is_today(stamp))
            .unwrap_or(false))
    }

    /// Appends entries to today's journal, or starts a fresh journal when the
    /// existing one belongs to another day.
    pub fn append_or_restart(&self, today: &Today, entries: &[FoodEntry]) -> Result<(), StoreError> {
        let entry_lines = entries.iter().map(|e| e.to_string());

        if self.is_current(today)? {
            let lines: Vec<String> = entry_lines.collect();
            return append_lines(&self.path, &lines);
        }

        tracing::debug!("Starting a new journal in {}", self.path.display());
        let mut lines = vec![
            format!("{}{}", DATE_PREFIX, today.stamp()),
            "-".repeat(SEPARATOR_LEN),
        ];
        lines.extend(entry_lines);
        write_lines(&self.path, &lines)
    }

    /// Every line after the date header, verbatim.
    pub fn list_today(&self) -> Result<Vec<String>, StoreError> {
        Ok(read_lines(&self.path)?
            .map(|lines| lines.into_iter().skip(1).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MacroTotals;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn test_journal() -> (DayFoodJournal, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let journal = DayFoodJournal::new(temp_dir.path());
        (journal, temp_dir)
    }

    fn day(d: u32, h: u32) -> Today {
        Today::at(
            NaiveDate::from_ymd_opt(2026, 10, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
        )
    }

    fn entry(name: &str, calories: i64) -> FoodEntry {
        FoodEntry::quick(name, MacroTotals::new(calories, 1.0, 2.0, 3.0))
    }

    #[test]
    fn test_missing_journal_is_not_current() {
        let (journal, _temp) = test_journal();
        assert!(!journal.is_current(&day(16, 9)).unwrap());
        assert!(journal.list_today().unwrap().is_empty());
    }

    #[test]
    fn test_first_write_adds_header() {
        let (journal, _temp) = test_journal();
        journal
            .append_or_restart(&day(16, 9), &[entry("Apple", 95)])
            .unwrap();

        let contents = fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Date-Fri Oct 16 09:00:00 2026");
        assert_eq!(lines[1], "-".repeat(57));
        assert_eq!(
            lines[2],
            "Apple  Grams:0  Servings:0  Calories:95  Protein:1  Carbs:2  Fat:3"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_same_day_appends_without_header() {
        let (journal, _temp) = test_journal();
        journal
            .append_or_restart(&day(16, 9), &[entry("Apple", 95)])
            .unwrap();
        journal
            .append_or_restart(&day(16, 18), &[entry("Rice", 200), entry("Beans", 120)])
            .unwrap();

        let listed = journal.list_today().unwrap();
        assert_eq!(listed.len(), 4);
        assert_eq!(listed[0], "-".repeat(57));
        assert!(listed[1].starts_with("Apple"));
        assert!(listed[2].starts_with("Rice"));
        assert!(listed[3].starts_with("Beans"));

        let contents = fs::read_to_string(journal.path()).unwrap();
        assert_eq!(contents.matches(DATE_PREFIX).count(), 1);
    }

    #[test]
    fn test_new_day_restarts_journal() {
        let (journal, _temp) = test_journal();
        journal
            .append_or_restart(&day(15, 21), &[entry("Pizza", 800)])
            .unwrap();
        journal
            .append_or_restart(&day(16, 8), &[entry("Oats", 300)])
            .unwrap();

        let contents = fs::read_to_string(journal.path()).unwrap();
        assert!(contents.starts_with("Date-Fri Oct 16 08:00:00 2026\n"));
        assert!(!contents.contains("Pizza"));
        assert!(journal.is_current(&day(16, 23)).unwrap());
    }

    #[test]
    fn test_headerless_file_is_restarted() {
        let (journal, _temp) = test_journal();
        fs::write(journal.path(), "scribbles\n").unwrap();

        assert!(!journal.is_current(&day(16, 9)).unwrap());
        journal
            .append_or_restart(&day(16, 9), &[entry("Apple", 95)])
            .unwrap();
        assert!(!fs::read_to_string(journal.path()).unwrap().contains("scribbles"));
    }

    #[test]
    fn test_list_today_skips_only_header() {
        let (journal, _temp) = test_journal();
        fs::write(
            journal.path(),
            "Date-Fri Oct 16 09:00:00 2026\n---\nfirst\n\nsecond\n",
        )
        .unwrap();

        assert_eq!(
            journal.list_today().unwrap(),
            vec!["---", "first", "", "second"]
        );
    }
}
