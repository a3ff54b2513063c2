//! Coordinates the daily stores for one run of the program.

use std::path::Path;

use crate::models::MacroTotals;
use crate::session::SessionLog;
use crate::store::{
    ConsumptionLog, DailyLedger, DayFoodJournal, HistoryArchiver, HistoryRecord, StoreError, Today,
};

/// Access to today's totals, the journal and the history.
///
/// Opening a tracker archives a snapshot left over from an earlier day before
/// anything can commit to the ledger.
#[derive(Debug)]
pub struct Tracker {
    ledger: DailyLedger,
    archiver: HistoryArchiver,
    journal: DayFoodJournal,
    consumption_log: ConsumptionLog,
}

/// What a commit changed.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitSummary {
    pub session: MacroTotals,
    pub day: MacroTotals,
    pub entries: usize,
}

impl Tracker {
    pub fn open(data_dir: &Path, today: &Today) -> Result<Self, StoreError> {
        let tracker = Self::with_stores(data_dir);
        if tracker.archiver.archive_if_rollover(&tracker.ledger, today)? {
            tracing::info!("New day, previous totals moved to history");
        }
        Ok(tracker)
    }

    /// Like `open`, but an unreadable snapshot only skips the archive step.
    ///
    /// For commands that never commit. A commit through this tracker still
    /// fails on the same snapshot.
    pub fn open_for_reading(data_dir: &Path, today: &Today) -> Result<Self, StoreError> {
        match Self::open(data_dir, today) {
            Err(e @ StoreError::MalformedRecord { .. }) => {
                tracing::warn!("Skipping history archive: {}", e);
                Ok(Self::with_stores(data_dir))
            }
            result => result,
        }
    }

    fn with_stores(data_dir: &Path) -> Self {
        Self {
            ledger: DailyLedger::new(data_dir),
            archiver: HistoryArchiver::new(data_dir),
            journal: DayFoodJournal::new(data_dir),
            consumption_log: ConsumptionLog::new(data_dir),
        }
    }

    pub fn current_day(&self, today: &Today) -> Result<MacroTotals, StoreError> {
        self.ledger.load_current_day(today)
    }

    /// Today's totals for display. An unreadable snapshot shows as zero.
    pub fn display_totals(&self, today: &Today) -> Result<MacroTotals, StoreError> {
        match self.ledger.load_current_day(today) {
            Err(e @ StoreError::MalformedRecord { .. }) => {
                tracing::warn!("Showing zero totals: {}", e);
                Ok(MacroTotals::zero())
            }
            result => result,
        }
    }

    /// Adds the session to today's totals, then records its entries in the
    /// journal and the consumption log.
    pub fn commit(&self, today: &Today, session: &SessionLog) -> Result<CommitSummary, StoreError> {
        let session_totals = session.totals();
        let day = self.ledger.commit(today, session_totals)?;
        self.journal.append_or_restart(today, session.entries())?;
        self.consumption_log.record(today, session.entries(), &day)?;

        tracing::info!(
            "Committed {} entr{} ({} kcal)",
            session.len(),
            if session.len() == 1 { "y" } else { "ies" },
            session_totals.calories
        );

        Ok(CommitSummary {
            session: session_totals,
            day,
            entries: session.len(),
        })
    }

    /// Journal lines for today. A journal left over from another day reads
    /// as empty until the next commit restarts it.
    pub fn eaten_today(&self, today: &Today) -> Result<Vec<String>, StoreError> {
        if !self.journal.is_current(today)? {
            return Ok(Vec::new());
        }
        self.journal.list_today()
    }

    pub fn history(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        self.archiver.load_history()
    }
}
