//! The personal food dictionary.

use clap::ValueEnum;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::{ensure_parent, StoreError, StoreFile};
use crate::models::Food;

/// Orderings offered when listing the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    Calories,
    Protein,
    Carbs,
    Fat,
}

/// Owns `FoodData.csv`: one `name,grams,servings,calories,protein,carbs,fat`
/// row per food, no header.
#[derive(Debug, Clone)]
pub struct FoodDictionary {
    path: PathBuf,
    foods: Vec<Food>,
}

impl FoodDictionary {
    /// Loads the dictionary. A missing file is an empty dictionary.
    pub fn load(data_dir: &Path) -> Result<Self, StoreError> {
        let path = StoreFile::FoodData.path_in(data_dir);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Self {
                    path,
                    foods: Vec::new(),
                })
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut foods = Vec::new();
        for row in reader.deserialize::<Food>() {
            match row {
                Ok(food) => foods.push(food),
                Err(e) => {
                    if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                        return Err(StoreError::Csv { path, source: e });
                    }
                    let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
                    return Err(StoreError::malformed(&path, line, e.to_string()));
                }
            }
        }

        tracing::debug!("Loaded {} food(s) from {}", foods.len(), path.display());
        Ok(Self { path, foods })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Food> {
        let name = name.trim().to_lowercase();
        self.foods.iter().find(|f| f.name.to_lowercase() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Food> {
        let name = name.trim().to_lowercase();
        self.foods.iter_mut().find(|f| f.name.to_lowercase() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn add(&mut self, food: Food) {
        self.foods.push(food);
    }

    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self
                .foods
                .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            SortKey::Calories => self.foods.sort_by_key(|f| f.calories),
            SortKey::Protein => self.foods.sort_by(|a, b| a.protein.total_cmp(&b.protein)),
            SortKey::Carbs => self.foods.sort_by(|a, b| a.carbs.total_cmp(&b.carbs)),
            SortKey::Fat => self.foods.sort_by(|a, b| a.fat.total_cmp(&b.fat)),
        }
    }

    /// Rewrites the whole dictionary file.
    pub fn save(&self) -> Result<(), StoreError> {
        ensure_parent(&self.path)?;
        let csv_err = |source: csv::Error| StoreError::Csv {
            path: self.path.clone(),
            source,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(csv_err)?;
        for food in &self.foods {
            writer.serialize(food).map_err(csv_err)?;
        }
        writer
            .flush()
            .map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!("Saved {} food(s) to {}", self.foods.len(), self.path.display());
        Ok(())
    }
}
