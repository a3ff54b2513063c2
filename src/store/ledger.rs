//! Current-day running totals.

use std::path::{Path, PathBuf};

use super::{read_lines, write_lines, HistoryRecord, StoreError, StoreFile, Today, DATE_PREFIX};
use crate::models::MacroTotals;

/// A day's totals together with the stamp of its last commit.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedSnapshot {
    pub date: String,
    pub totals: MacroTotals,
}

impl DatedSnapshot {
    pub fn to_record(&self) -> HistoryRecord {
        HistoryRecord {
            date_line: format!("{}{}", DATE_PREFIX, self.date),
            totals_line: self.totals.to_record_line(),
        }
    }
}

/// Owns `DayTotals.txt`, the single overwritten record of today's totals.
#[derive(Debug, Clone)]
pub struct DailyLedger {
    path: PathBuf,
}

impl DailyLedger {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: StoreFile::DayTotals.path_in(data_dir),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The two stored lines exactly as written.
    ///
    /// Returns `Ok(None)` when the file is missing or empty.
    pub fn read_raw(&self) -> Result<Option<HistoryRecord>, StoreError> {
        let lines = match read_lines(&self.path)? {
            Some(lines) => lines,
            None => return Ok(None),
        };

        let mut lines = lines.into_iter();
        let date_line = match lines.next() {
            Some(line) if !line.trim().is_empty() => line,
            _ => return Ok(None),
        };
        let totals_line = lines
            .next()
            .ok_or_else(|| StoreError::malformed(&self.path, 2, "missing totals line"))?;

        Ok(Some(HistoryRecord {
            date_line,
            totals_line,
        }))
    }

    /// The stored snapshot, fully parsed.
    #[cfg(test)]
    pub fn read(&self) -> Result<Option<DatedSnapshot>, StoreError> {
        match self.read_raw()? {
            Some(record) => Ok(Some(DatedSnapshot {
                date: self.stamp_of(&record)?.to_string(),
                totals: self.totals_of(&record)?,
            })),
            None => Ok(None),
        }
    }

    /// Today's running totals, or zero if nothing has been committed today.
    pub fn load_current_day(&self, today: &Today) -> Result<MacroTotals, StoreError> {
        Ok(self.carried_totals(today)?.unwrap_or_default())
    }

    /// Adds a session's totals to today's running totals and overwrites the
    /// snapshot. A snapshot from an earlier day is not carried over.
    pub fn commit(&self, today: &Today, session: MacroTotals) -> Result<MacroTotals, StoreError> {
        let carried = self.carried_totals(today)?;
        if carried.is_none() {
            tracing::debug!("Starting a new day in {}", self.path.display());
        }

        let totals = carried
            .unwrap_or_default()
            .checked_add(session)
            .ok_or_else(|| StoreError::malformed(&self.path, 2, "calorie total out of range"))?;
        let snapshot = DatedSnapshot {
            date: today.stamp(),
            totals,
        };
        let record = snapshot.to_record();
        write_lines(&self.path, &[record.date_line, record.totals_line])?;

        tracing::debug!("Committed day totals: {}", snapshot.totals.to_record_line());
        Ok(snapshot.totals)
    }

    /// Stored totals if the snapshot is from today. Totals of an older
    /// snapshot are never parsed.
    fn carried_totals(&self, today: &Today) -> Result<Option<MacroTotals>, StoreError> {
        let record = match self.read_raw()? {
            Some(record) => record,
            None => return Ok(None),
        };

        if !today.is_today(self.stamp_of(&record)?) {
            return Ok(None);
        }
        self.totals_of(&record).map(Some)
    }

    pub(super) fn stamp_of<'a>(&self, record: &'a HistoryRecord) -> Result<&'a str, StoreError> {
        record
            .stamp()
            .ok_or_else(|| StoreError::malformed(&self.path, 1, "expected a 'Date-' line"))
    }

    fn totals_of(&self, record: &HistoryRecord) -> Result<MacroTotals, StoreError> {
        record
            .totals()
            .map_err(|e| StoreError::malformed(&self.path, 2, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn test_ledger() -> (DailyLedger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let ledger = DailyLedger::new(temp_dir.path());
        (ledger, temp_dir)
    }

    fn day(d: u32, h: u32) -> Today {
        Today::at(
            NaiveDate::from_ymd_opt(2026, 10, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let (ledger, _temp) = test_ledger();
        assert_eq!(ledger.load_current_day(&day(16, 9)).unwrap(), MacroTotals::zero());
        assert!(ledger.read().unwrap().is_none());
    }

    #[test]
    fn test_empty_file_loads_zero() {
        let (ledger, _temp) = test_ledger();
        fs::write(ledger.path(), "").unwrap();
        assert_eq!(ledger.load_current_day(&day(16, 9)).unwrap(), MacroTotals::zero());
    }

    #[test]
    fn test_commit_writes_stamped_snapshot() {
        let (ledger, _temp) = test_ledger();
        ledger
            .commit(&day(16, 9), MacroTotals::new(500, 40.0, 50.0, 15.0))
            .unwrap();

        let contents = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(
            contents,
            "Date-Fri Oct 16 09:00:00 2026\nCalories:500  Protein:40  Carbs:50  Fats:15\n"
        );
    }

    #[test]
    fn test_same_day_commits_accumulate() {
        let (ledger, _temp) = test_ledger();
        ledger
            .commit(&day(16, 9), MacroTotals::new(100, 10.0, 10.0, 5.0))
            .unwrap();
        let total = ledger
            .commit(&day(16, 13), MacroTotals::new(200, 20.0, 20.0, 10.0))
            .unwrap();

        assert_eq!(total, MacroTotals::new(300, 30.0, 30.0, 15.0));
        assert_eq!(
            ledger.load_current_day(&day(16, 20)).unwrap(),
            MacroTotals::new(300, 30.0, 30.0, 15.0)
        );
    }

    #[test]
    fn test_split_commits_equal_single_commit() {
        let a = MacroTotals::new(420, 31.5, 12.25, 9.0);
        let b = MacroTotals::new(135, 2.0, 30.5, 0.5);

        let (split, _t1) = test_ledger();
        split.commit(&day(16, 8), a).unwrap();
        split.commit(&day(16, 12), b).unwrap();

        let (single, _t2) = test_ledger();
        single.commit(&day(16, 12), a + b).unwrap();

        assert_eq!(
            split.read().unwrap().unwrap().totals,
            single.read().unwrap().unwrap().totals
        );
    }

    #[test]
    fn test_new_day_commit_does_not_carry_over() {
        let (ledger, _temp) = test_ledger();
        ledger
            .commit(&day(15, 21), MacroTotals::new(1800, 120.0, 200.0, 60.0))
            .unwrap();

        let total = ledger
            .commit(&day(16, 8), MacroTotals::new(500, 40.0, 50.0, 15.0))
            .unwrap();

        assert_eq!(total, MacroTotals::new(500, 40.0, 50.0, 15.0));
        let snapshot = ledger.read().unwrap().unwrap();
        assert_eq!(snapshot.date, "Fri Oct 16 08:00:00 2026");
    }

    #[test]
    fn test_stale_snapshot_loads_zero() {
        let (ledger, _temp) = test_ledger();
        ledger
            .commit(&day(15, 21), MacroTotals::new(1800, 120.0, 200.0, 60.0))
            .unwrap();
        assert_eq!(ledger.load_current_day(&day(16, 8)).unwrap(), MacroTotals::zero());
    }

    #[test]
    fn test_snapshot_roundtrip_is_exact() {
        let (ledger, _temp) = test_ledger();
        let totals = MacroTotals::new(1234, 87.3, 143.75, 41.1);
        ledger.commit(&day(16, 9), totals).unwrap();
        assert_eq!(ledger.load_current_day(&day(16, 9)).unwrap(), totals);
    }

    #[test]
    fn test_reads_hand_written_single_spaced_snapshot() {
        let (ledger, _temp) = test_ledger();
        fs::write(
            ledger.path(),
            "Date-Fri Oct 16 07:12:44 2026\nCalories:1800 Protein:120 Carbs:200 Fats:60\n",
        )
        .unwrap();
        assert_eq!(
            ledger.load_current_day(&day(16, 9)).unwrap(),
            MacroTotals::new(1800, 120.0, 200.0, 60.0)
        );
    }

    #[test]
    fn test_malformed_totals_today_is_an_error() {
        let (ledger, _temp) = test_ledger();
        fs::write(
            ledger.path(),
            "Date-Fri Oct 16 07:12:44 2026\nCalories:lots  Protein:1  Carbs:1  Fats:1\n",
        )
        .unwrap();

        let err = ledger.load_current_day(&day(16, 9)).unwrap_err();
        assert!(err.is_malformed());
        assert!(ledger
            .commit(&day(16, 9), MacroTotals::new(1, 1.0, 1.0, 1.0))
            .is_err());
    }

    #[test]
    fn test_malformed_totals_from_old_day_are_ignored() {
        let (ledger, _temp) = test_ledger();
        fs::write(
            ledger.path(),
            "Date-Thu Oct 15 07:12:44 2026\nCalories:lots  Protein:1  Carbs:1  Fats:1\n",
        )
        .unwrap();

        assert_eq!(ledger.load_current_day(&day(16, 9)).unwrap(), MacroTotals::zero());
        let total = ledger
            .commit(&day(16, 9), MacroTotals::new(10, 1.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(total, MacroTotals::new(10, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_missing_date_prefix_is_malformed() {
        let (ledger, _temp) = test_ledger();
        fs::write(
            ledger.path(),
            "Fri Oct 16 07:12:44 2026\nCalories:1  Protein:1  Carbs:1  Fats:1\n",
        )
        .unwrap();

        let err = ledger.load_current_day(&day(16, 9)).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_missing_totals_line_is_malformed() {
        let (ledger, _temp) = test_ledger();
        fs::write(ledger.path(), "Date-Fri Oct 16 07:12:44 2026\n").unwrap();
        assert!(ledger.read_raw().unwrap_err().is_malformed());
    }

    #[test]
    fn test_short_stamp_is_a_new_day() {
        let (ledger, _temp) = test_ledger();
        fs::write(
            ledger.path(),
            "Date-Fri\nCalories:900  Protein:1  Carbs:1  Fats:1\n",
        )
        .unwrap();
        assert_eq!(ledger.load_current_day(&day(16, 9)).unwrap(), MacroTotals::zero());
    }

    #[test]
    fn test_commit_past_calorie_limit_is_rejected() {
        let (ledger, _temp) = test_ledger();
        let stored = format!(
            "Date-Fri Oct 16 07:12:44 2026\nCalories:{}  Protein:1  Carbs:1  Fats:1\n",
            i64::MAX
        );
        fs::write(ledger.path(), &stored).unwrap();

        let err = ledger
            .commit(&day(16, 9), MacroTotals::new(1, 0.0, 0.0, 0.0))
            .unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("out of range"));
        // The stored snapshot is left untouched
        assert_eq!(fs::read_to_string(ledger.path()).unwrap(), stored);
    }
}
