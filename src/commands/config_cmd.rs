use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::config::Config;
use crate::store::StoreFile;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                        println!();

                        println!("Files:");
                        for file in [
                            StoreFile::DayTotals,
                            StoreFile::MacrosLog,
                            StoreFile::DayFoods,
                            StoreFile::FoodLog,
                            StoreFile::FoodData,
                        ] {
                            let path = file.path_in(&config.data_dir.value);
                            let state = if path.exists() { "" } else { " (not created yet)" };
                            println!("  {}{}", path.display(), state);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
