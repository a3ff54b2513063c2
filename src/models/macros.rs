use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Running macro-nutrient totals.
///
/// Calories are whole numbers; protein, carbs and fat are grams and may be
/// fractional. Negative values are accepted as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroTotals {
    pub fn new(calories: i64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Totals line as stored on disk: `Calories:<int>  Protein:<num>  Carbs:<num>  Fats:<num>`.
    ///
    /// Floats use the shortest representation that reads back to the same value.
    pub fn to_record_line(&self) -> String {
        format!(
            "Calories:{}  Protein:{}  Carbs:{}  Fats:{}",
            self.calories, self.protein, self.carbs, self.fat
        )
    }

    /// Sum that reports calorie overflow instead of saturating.
    pub fn checked_add(self, other: MacroTotals) -> Option<MacroTotals> {
        Some(MacroTotals {
            calories: self.calories.checked_add(other.calories)?,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        })
    }

    /// Rounded to whole grams for display.
    pub fn rounded(&self) -> Self {
        Self {
            calories: self.calories,
            protein: self.protein.round(),
            carbs: self.carbs.round(),
            fat: self.fat.round(),
        }
    }
}

/// Calories saturate at the `i64` bounds.
impl Add for MacroTotals {
    type Output = MacroTotals;

    fn add(self, other: MacroTotals) -> MacroTotals {
        MacroTotals {
            calories: self.calories.saturating_add(other.calories),
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, other: MacroTotals) {
        *self = *self + other;
    }
}

impl Sum for MacroTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MacroTotals::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for MacroTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.rounded();
        write!(
            f,
            "Calories:{}  Protein:{}  Carbs:{}  Fats:{}",
            r.calories, r.protein, r.carbs, r.fat
        )
    }
}

/// Why a totals line could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTotalsError(pub String);

impl fmt::Display for ParseTotalsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseTotalsError {}

const LABELS: [&str; 4] = ["Calories", "Protein", "Carbs", "Fats"];

impl FromStr for MacroTotals {
    type Err = ParseTotalsError;

    /// Parses a stored totals line. Fields are whitespace separated
    /// `Label:value` tokens and must appear in the stored order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != LABELS.len() {
            return Err(ParseTotalsError(format!(
                "expected {} labeled fields, found {}",
                LABELS.len(),
                tokens.len()
            )));
        }

        let mut values = [""; 4];
        for (i, (token, label)) in tokens.iter().zip(LABELS).enumerate() {
            let value = token
                .strip_prefix(label)
                .and_then(|rest| rest.strip_prefix(':'))
                .ok_or_else(|| ParseTotalsError(format!("expected '{}:' in '{}'", label, token)))?;
            values[i] = value;
        }

        let calories = values[0]
            .parse::<i64>()
            .map_err(|_| ParseTotalsError(format!("invalid calories '{}'", values[0])))?;
        let grams = |label: &str, raw: &str| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParseTotalsError(format!("invalid {} '{}'", label, raw)))
        };

        Ok(MacroTotals {
            calories,
            protein: grams("protein", values[1])?,
            carbs: grams("carbs", values[2])?,
            fat: grams("fats", values[3])?,
        })
    }
}
