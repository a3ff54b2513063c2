use clap::Args;
use serde_json::json;

use super::{print_rule, OutputFormat};
use crate::store::{HistoryArchiver, HistoryAverages, Today};
use crate::tracker::Tracker;

/// Show today's running totals
#[derive(Args)]
pub struct TodayCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl TodayCommand {
    pub fn run(&self, tracker: &Tracker, today: &Today) -> Result<(), Box<dyn std::error::Error>> {
        let totals = tracker.display_totals(today)?;

        match self.format {
            OutputFormat::Json => {
                let out = json!({
                    "date": today.date().to_string(),
                    "totals": totals,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Text => {
                println!("Totals for {}", today.date().format("%A, %B %-d %Y"));
                print_rule();
                println!("{}", totals);
            }
        }

        Ok(())
    }
}

/// List everything logged today
#[derive(Args)]
pub struct EatenCommand {}

impl EatenCommand {
    pub fn run(&self, tracker: &Tracker, today: &Today) -> Result<(), Box<dyn std::error::Error>> {
        let lines = tracker.eaten_today(today)?;
        if lines.is_empty() {
            println!("Nothing logged today.");
            return Ok(());
        }

        println!("Food eaten today");
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }
}

/// Show totals of previous days
#[derive(Args)]
pub struct HistoryCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show the mean of the archived days instead of every day
    #[arg(long)]
    pub averages: bool,
}

impl HistoryCommand {
    pub fn run(&self, tracker: &Tracker) -> Result<(), Box<dyn std::error::Error>> {
        let history = tracker.history()?;

        if self.averages {
            let averages = HistoryAverages::from_records(&history);
            return match self.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&averages)?);
                    Ok(())
                }
                OutputFormat::Text => {
                    print_averages(averages.as_ref());
                    Ok(())
                }
            };
        }

        match self.format {
            OutputFormat::Json => {
                let days: Vec<_> = history
                    .iter()
                    .map(|record| {
                        json!({
                            "date": record.stamp(),
                            "totals": record.totals().ok(),
                            "raw": record,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&days)?);
            }
            OutputFormat::Text => {
                if history.is_empty() {
                    println!("No history yet.");
                    return Ok(());
                }
                for line in HistoryArchiver::render(&history) {
                    println!("{}", line);
                }
            }
        }

        Ok(())
    }
}

fn print_averages(averages: Option<&HistoryAverages>) {
    let Some(avg) = averages else {
        println!("No history yet.");
        return;
    };

    println!(
        "Daily averages over {} day{}",
        avg.days,
        if avg.days == 1 { "" } else { "s" }
    );
    print_rule();
    println!(
        "Calories:{}  Protein:{}  Carbs:{}  Fats:{}",
        avg.calories.round(),
        avg.protein.round(),
        avg.carbs.round(),
        avg.fat.round()
    );
    if avg.skipped > 0 {
        println!("({} unreadable day(s) skipped)", avg.skipped);
    }
}
