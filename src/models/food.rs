use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MacroTotals;

/// A food in the personal dictionary.
///
/// Weighed foods have `grams > 0` and their macros describe that many grams.
/// Otherwise `servings` says how many servings the macros describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub name: String,
    pub grams: i64,
    pub servings: i64,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Food {
    pub fn weighed(name: impl Into<String>, grams: i64, macros: MacroTotals) -> Self {
        Self::with_measure(name, grams, 0, macros)
    }

    pub fn by_servings(name: impl Into<String>, servings: i64, macros: MacroTotals) -> Self {
        Self::with_measure(name, 0, servings, macros)
    }

    fn with_measure(name: impl Into<String>, grams: i64, servings: i64, macros: MacroTotals) -> Self {
        Self {
            name: name.into(),
            grams,
            servings,
            calories: macros.calories,
            protein: macros.protein,
            carbs: macros.carbs,
            fat: macros.fat,
        }
    }

    pub fn is_weighed(&self) -> bool {
        self.grams > 0
    }

    pub fn macros(&self) -> MacroTotals {
        MacroTotals::new(self.calories, self.protein, self.carbs, self.fat)
    }

    /// Scales this food to the eaten amount. The amount is grams for weighed
    /// foods and servings otherwise.
    pub fn portion(&self, amount: f64) -> Result<FoodEntry, PortionError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PortionError::InvalidAmount(amount));
        }

        let (ratio, grams, servings) = if self.is_weighed() {
            (amount / self.grams as f64, amount.round() as i64, 0)
        } else if self.servings > 0 {
            (amount / self.servings as f64, 0, amount.round() as i64)
        } else {
            return Err(PortionError::NoServingSize(self.name.clone()));
        };

        let base = self.macros();
        Ok(FoodEntry {
            name: self.name.clone(),
            grams,
            servings,
            calories: (ratio * base.calories as f64).round() as i64,
            protein: ratio * base.protein,
            carbs: ratio * base.carbs,
            fat: ratio * base.fat,
        })
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if self.is_weighed() {
            writeln!(f, "  Per {} g", self.grams)?;
        } else {
            writeln!(f, "  Per {} serving(s)", self.servings)?;
        }
        write!(
            f,
            "  Calories:{}  Protein:{}  Carbs:{}  Fat:{}",
            self.calories, self.protein, self.carbs, self.fat
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PortionError {
    InvalidAmount(f64),
    NoServingSize(String),
}

impl fmt::Display for PortionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortionError::InvalidAmount(amount) => write!(f, "Invalid amount: {}", amount),
            PortionError::NoServingSize(name) => {
                write!(f, "'{}' has neither a gram weight nor a serving count", name)
            }
        }
    }
}

impl std::error::Error for PortionError {}

/// One logged consumption, either a dictionary portion or a quick entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    pub grams: i64,
    pub servings: i64,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl FoodEntry {
    /// An entry with explicit macros that never touches the dictionary.
    pub fn quick(name: impl Into<String>, macros: MacroTotals) -> Self {
        Self {
            name: name.into(),
            grams: 0,
            servings: 0,
            calories: macros.calories,
            protein: macros.protein,
            carbs: macros.carbs,
            fat: macros.fat,
        }
    }

    pub fn macros(&self) -> MacroTotals {
        MacroTotals::new(self.calories, self.protein, self.carbs, self.fat)
    }
}

impl fmt::Display for FoodEntry {
    /// Single journal line, macros shown to one decimal place at most.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  Grams:{}  Servings:{}  Calories:{}  Protein:{}  Carbs:{}  Fat:{}",
            self.name,
            self.grams,
            self.servings,
            self.calories,
            one_decimal(self.protein),
            one_decimal(self.carbs),
            one_decimal(self.fat)
        )
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A `NAME=AMOUNT` argument naming a dictionary food and how much was eaten.
#[derive(Debug, Clone, PartialEq)]
pub struct PortionSpec {
    pub name: String,
    pub amount: f64,
}

impl FromStr for PortionSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, amount) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("Invalid portion '{}'. Use NAME=AMOUNT.", s))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("Invalid portion '{}': missing food name", s));
        }
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| format!("Invalid amount in '{}'", s))?;
        Ok(Self {
            name: name.to_string(),
            amount,
        })
    }
}
