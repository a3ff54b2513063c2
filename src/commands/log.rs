use clap::Args;

use super::print_rule;
use crate::models::{FoodEntry, MacroTotals, PortionSpec};
use crate::session::SessionLog;
use crate::store::{FoodDictionary, Today};
use crate::tracker::Tracker;

/// Log portions of dictionary foods
#[derive(Args)]
pub struct LogCommand {
    /// Food and amount eaten. Amounts are grams for weighed foods and servings
    /// otherwise (e.g. oats=80 egg=2)
    #[arg(required = true, value_name = "NAME=AMOUNT")]
    pub portions: Vec<PortionSpec>,

    /// Show what would be logged without saving anything
    #[arg(long)]
    pub dry_run: bool,
}

impl LogCommand {
    pub fn run(
        &self,
        tracker: &Tracker,
        dictionary: &FoodDictionary,
        today: &Today,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut session = SessionLog::new();

        for spec in &self.portions {
            let food = dictionary.find(&spec.name).ok_or_else(|| {
                format!(
                    "Food not found: '{}'. Add it with 'meals food add' or use 'meals quick'.",
                    spec.name
                )
            })?;
            let entry = food
                .portion(spec.amount)
                .map_err(|e| format!("Cannot log '{}': {}", food.name, e))?;
            tracing::debug!("Portion of {}: {} kcal", entry.name, entry.calories);
            session.add(entry);
        }

        commit_session(tracker, today, &session, self.dry_run)
    }
}

/// Log a one-off food with explicit macros
#[derive(Args)]
pub struct QuickCommand {
    /// Name to show in the journal
    pub name: String,

    /// Calories
    #[arg(long, allow_negative_numbers = true)]
    pub calories: i64,

    /// Protein in grams
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub protein: f64,

    /// Carbohydrates in grams
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub carbs: f64,

    /// Fat in grams
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub fat: f64,

    /// Show what would be logged without saving anything
    #[arg(long)]
    pub dry_run: bool,
}

impl QuickCommand {
    pub fn run(&self, tracker: &Tracker, today: &Today) -> Result<(), Box<dyn std::error::Error>> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Food name cannot be empty".into());
        }

        let mut session = SessionLog::new();
        session.add(FoodEntry::quick(
            name,
            MacroTotals::new(self.calories, self.protein, self.carbs, self.fat),
        ));

        commit_session(tracker, today, &session, self.dry_run)
    }
}

fn commit_session(
    tracker: &Tracker,
    today: &Today,
    session: &SessionLog,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if session.is_empty() {
        println!("Nothing to log.");
        return Ok(());
    }

    println!("Food eaten this session");
    print_rule();
    for entry in session.entries() {
        println!("{}", entry);
    }
    print_rule();

    if dry_run {
        let projected = tracker.current_day(today)? + session.totals();
        println!("Session totals: {}", session.totals());
        println!("Day totals would be: {}", projected);
        println!("Dry run, nothing saved.");
        return Ok(());
    }

    let summary = tracker.commit(today, session)?;
    println!("Session totals: {}", summary.session);
    println!("Day totals: {}", summary.day);
    println!(
        "Saved {} entr{}.",
        summary.entries,
        if summary.entries == 1 { "y" } else { "ies" }
    );
    Ok(())
}
