mod food;
mod macros;

pub use food::{Food, FoodEntry, PortionSpec};
pub use macros::{MacroTotals, ParseTotalsError};
