use crate::models::{FoodEntry, MacroTotals};

/// Entries logged during one run of the program, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: Vec<FoodEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: FoodEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over this session's entries only.
    pub fn totals(&self) -> MacroTotals {
        self.entries.iter().map(FoodEntry::macros).sum()
    }
}
