use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::models::{Food, MacroTotals};
use crate::store::{FoodDictionary, SortKey};

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// Add a food to the dictionary
    Add {
        /// Name of the food
        name: String,

        /// Weight in grams the macros below describe
        #[arg(long, conflicts_with = "servings", required_unless_present = "servings")]
        grams: Option<i64>,

        /// Number of servings the macros below describe
        #[arg(long)]
        servings: Option<i64>,

        /// Calories
        #[arg(long)]
        calories: i64,

        /// Protein in grams
        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        /// Carbohydrates in grams
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        /// Fat in grams
        #[arg(long, default_value_t = 0.0)]
        fat: f64,
    },

    /// List all foods
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Sort order
        #[arg(long, short, value_enum, default_value = "name")]
        sort: SortKey,
    },

    /// Show a food's details
    Show {
        /// Food name
        name: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update an existing food
    Edit {
        /// Food name
        name: String,

        /// New name
        #[arg(long)]
        rename: Option<String>,

        /// Weight in grams the macros describe
        #[arg(long, conflicts_with = "servings")]
        grams: Option<i64>,

        /// Number of servings the macros describe (clears the gram weight)
        #[arg(long)]
        servings: Option<i64>,

        /// Calories
        #[arg(long)]
        calories: Option<i64>,

        /// Protein in grams
        #[arg(long)]
        protein: Option<f64>,

        /// Carbohydrates in grams
        #[arg(long)]
        carbs: Option<f64>,

        /// Fat in grams
        #[arg(long)]
        fat: Option<f64>,
    },
}

impl FoodCommand {
    pub fn run(&self, dictionary: &mut FoodDictionary) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FoodSubcommand::Add {
                name,
                grams,
                servings,
                calories,
                protein,
                carbs,
                fat,
            } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err("Food name cannot be empty".into());
                }
                if dictionary.contains(name) {
                    return Err(format!("Food already exists: {}", name).into());
                }

                let macros = MacroTotals::new(*calories, *protein, *carbs, *fat);
                let food = match (grams, servings) {
                    (Some(g), _) if *g > 0 => Food::weighed(name, *g, macros),
                    (None, Some(s)) if *s > 0 => Food::by_servings(name, *s, macros),
                    _ => return Err("Grams or servings must be greater than zero".into()),
                };

                dictionary.add(food.clone());
                dictionary.save()?;
                tracing::info!("Added '{}' to {}", food.name, dictionary.path().display());

                println!("Added food:");
                println!("{}", food);
                Ok(())
            }

            FoodSubcommand::List { format, sort } => {
                if dictionary.is_empty() {
                    println!("No foods found");
                    return Ok(());
                }

                dictionary.sort_by(*sort);
                let foods = dictionary.foods();

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(foods)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<30}  {:>10}  {:>8}  {:>8}  {:>8}  {:>8}",
                            "NAME", "PER", "KCAL", "PROTEIN", "CARBS", "FAT"
                        );
                        println!("{}", "-".repeat(84));
                        for food in foods {
                            let name = if food.name.chars().count() > 30 {
                                format!("{}...", food.name.chars().take(27).collect::<String>())
                            } else {
                                food.name.clone()
                            };
                            let per = if food.is_weighed() {
                                format!("{} g", food.grams)
                            } else {
                                format!("{} srv", food.servings)
                            };
                            println!(
                                "{:<30}  {:>10}  {:>8}  {:>8.1}  {:>8.1}  {:>8.1}",
                                name, per, food.calories, food.protein, food.carbs, food.fat
                            );
                        }
                        println!("\nTotal: {} food(s)", foods.len());
                    }
                }
                Ok(())
            }

            FoodSubcommand::Show { name, format } => {
                let food = dictionary
                    .find(name)
                    .ok_or_else(|| format!("Food not found: {}", name))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(food)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", food);
                    }
                }
                Ok(())
            }

            FoodSubcommand::Edit {
                name,
                rename,
                grams,
                servings,
                calories,
                protein,
                carbs,
                fat,
            } => {
                let has_updates = rename.is_some()
                    || grams.is_some()
                    || servings.is_some()
                    || calories.is_some()
                    || protein.is_some()
                    || carbs.is_some()
                    || fat.is_some();

                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                if let Some(new_name) = rename {
                    let new_name = new_name.trim();
                    if new_name.is_empty() {
                        return Err("Food name cannot be empty".into());
                    }
                    let taken = dictionary
                        .find(new_name)
                        .is_some_and(|other| other.name.to_lowercase() != name.trim().to_lowercase());
                    if taken {
                        return Err(format!("Food already exists: {}", new_name).into());
                    }
                }

                let food = dictionary
                    .find_mut(name)
                    .ok_or_else(|| format!("Food not found: {}", name))?;

                if let Some(new_name) = rename {
                    food.name = new_name.trim().to_string();
                }
                if let Some(g) = grams {
                    if *g <= 0 {
                        return Err("Grams must be greater than zero".into());
                    }
                    food.grams = *g;
                    food.servings = 0;
                }
                if let Some(s) = servings {
                    if *s <= 0 {
                        return Err("Servings must be greater than zero".into());
                    }
                    food.grams = 0;
                    food.servings = *s;
                }
                if let Some(c) = calories {
                    food.calories = *c;
                }
                if let Some(p) = protein {
                    food.protein = *p;
                }
                if let Some(c) = carbs {
                    food.carbs = *c;
                }
                if let Some(f) = fat {
                    food.fat = *f;
                }

                let updated = food.clone();
                dictionary.save()?;

                println!("Updated food:");
                println!("{}", updated);
                Ok(())
            }
        }
    }
}
