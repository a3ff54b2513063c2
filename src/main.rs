use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod models;
mod session;
mod store;
mod tracker;

use commands::{
    ConfigCommand, EatenCommand, FoodCommand, HistoryCommand, LogCommand, QuickCommand,
    TodayCommand,
};
use config::Config;
use store::{FoodDictionary, Today};
use tracker::Tracker;

#[derive(Parser)]
#[command(name = "meals")]
#[command(version)]
#[command(about = "Track daily calories and macros", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's totals
    Today(TodayCommand),

    /// Log dictionary foods eaten
    Log(LogCommand),

    /// Log a food that is not in the dictionary
    Quick(QuickCommand),

    /// List what was eaten today
    Eaten(EatenCommand),

    /// Show totals of previous days
    History(HistoryCommand),

    /// Manage the food dictionary
    Food(FoodCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "meals=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    let data_dir = &config.data_dir.value;

    // One clock reading per run so every store agrees on the day
    let today = Today::now();

    match cli.command {
        Some(Commands::Today(cmd)) => {
            let tracker = Tracker::open_for_reading(data_dir, &today)?;
            cmd.run(&tracker, &today)?;
        }
        Some(Commands::Log(cmd)) => {
            let tracker = Tracker::open(data_dir, &today)?;
            let dictionary = FoodDictionary::load(data_dir)?;
            cmd.run(&tracker, &dictionary, &today)?;
        }
        Some(Commands::Quick(cmd)) => {
            let tracker = Tracker::open(data_dir, &today)?;
            cmd.run(&tracker, &today)?;
        }
        Some(Commands::Eaten(cmd)) => {
            let tracker = Tracker::open_for_reading(data_dir, &today)?;
            cmd.run(&tracker, &today)?;
        }
        Some(Commands::History(cmd)) => {
            let tracker = Tracker::open_for_reading(data_dir, &today)?;
            cmd.run(&tracker)?;
        }
        Some(Commands::Food(cmd)) => {
            let mut dictionary = FoodDictionary::load(data_dir)?;
            cmd.run(&mut dictionary)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
