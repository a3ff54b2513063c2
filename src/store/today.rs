//! The shared "is it still today" query.
//!
//! Every store that stamps its contents with a date asks the same `Today`
//! value, so the ledger and the journal always agree on the day boundary.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// `ctime`-style timestamp, e.g. `Thu Oct 16 14:26:00 2026`.
pub const STAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Number of leading stamp characters (`Www Mmm dd`) that identify a day.
pub const DAY_PREFIX_LEN: usize = 10;

/// Compares the day prefixes of two stamps.
///
/// Both stamps must be at least `DAY_PREFIX_LEN` characters long and agree on
/// every one of those characters. Shorter stamps never match.
pub fn is_same_day(persisted: &str, now: &str) -> bool {
    match (day_prefix(persisted), day_prefix(now)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn day_prefix(stamp: &str) -> Option<&str> {
    stamp
        .char_indices()
        .nth(DAY_PREFIX_LEN)
        .map(|(end, _)| &stamp[..end])
        .or_else(|| (stamp.chars().count() == DAY_PREFIX_LEN).then_some(stamp))
}

/// Wall-clock time captured once for a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Today {
    now: NaiveDateTime,
}

impl Today {
    /// Captures the local wall clock.
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn date(&self) -> NaiveDate {
        self.now.date()
    }

    /// The stamp written after `Date-` in every dated store.
    pub fn stamp(&self) -> String {
        self.now.format(STAMP_FORMAT).to_string()
    }

    /// Whether a persisted stamp falls on the same calendar day.
    ///
    /// Stamps are compared as dates. A stamp that does not parse as a
    /// timestamp falls back to the day-prefix comparison.
    pub fn is_today(&self, stamp: &str) -> bool {
        let stamp = stamp.trim();
        match NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT) {
            Ok(then) => then.date() == self.date(),
            Err(_) => is_same_day(stamp, &self.stamp()),
        }
    }
}
