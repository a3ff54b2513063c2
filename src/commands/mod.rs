mod config_cmd;
mod day;
mod food;
mod log;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use day::{EatenCommand, HistoryCommand, TodayCommand};
pub use food::FoodCommand;
pub use log::{LogCommand, QuickCommand};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const RULE_LEN: usize = 57;

fn print_rule() {
    println!("{}", "-".repeat(RULE_LEN));
}
