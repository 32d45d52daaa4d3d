//! Shelf-life table configuration
//!
//! The table is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/freshkeeper/config/shelf_life.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::FoodCategory;

/// Embedded default table (compiled into binary)
const DEFAULT_TABLE: &str = include_str!("../../../config/shelf_life.toml");

/// Version tag of the built-in table
pub const STANDARD_TABLE_VERSION: &str = "category-v1";

/// Days used for categories without an entry
pub const STANDARD_FALLBACK_DAYS: i64 = 7;

const STANDARD_DAYS: &[(&str, i64)] = &[
    ("dairy", 7),
    ("meat", 3),
    ("vegetables", 5),
    ("fruits", 7),
    ("grains", 365),
    ("canned", 730),
];

/// Named, versioned category → shelf-life lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLifeTable {
    pub version: String,
    pub fallback_days: i64,
    /// Keyed by lowercase category name
    pub days: BTreeMap<String, i64>,
}

impl Default for ShelfLifeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShelfLifeTable {
    /// The built-in table
    pub fn standard() -> Self {
        Self {
            version: STANDARD_TABLE_VERSION.to_string(),
            fallback_days: STANDARD_FALLBACK_DAYS,
            days: STANDARD_DAYS
                .iter()
                .map(|(name, days)| (name.to_string(), *days))
                .collect(),
        }
    }

    /// Load the override file if present, otherwise the embedded table
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::parse(DEFAULT_TABLE),
        }
    }

    /// Load from an explicit path, falling back to the embedded table if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Shelf-life override not found, using defaults");
            return Self::parse(DEFAULT_TABLE);
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let table = Self::parse(&content)?;
        info!(
            path = %path.display(),
            version = %table.version,
            "Loaded shelf-life table override"
        );
        Ok(table)
    }

    /// Parse and validate a TOML table
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawTable = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid shelf-life TOML: {}", e)))?;

        let table = Self {
            version: raw
                .version
                .unwrap_or_else(|| STANDARD_TABLE_VERSION.to_string()),
            fallback_days: raw.fallback_days.unwrap_or(STANDARD_FALLBACK_DAYS),
            days: raw
                .days
                .unwrap_or_default()
                .into_iter()
                .map(|(name, days)| (name.trim().to_lowercase(), days))
                .collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Replace (or add) one category's entry
    pub fn with_override(mut self, category: &FoodCategory, days: i64) -> Result<Self> {
        self.days.insert(category.as_str().to_lowercase(), days);
        self.validate()?;
        Ok(self)
    }

    /// Shelf-life in days for a category
    pub fn days_for(&self, category: &FoodCategory) -> i64 {
        self.days
            .get(&category.as_str().to_lowercase())
            .copied()
            .unwrap_or(self.fallback_days)
    }

    /// Every duration must be non-negative so expiry never precedes purchase
    fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::Config("Shelf-life table version is empty".into()));
        }
        if self.fallback_days < 0 {
            return Err(Error::Config(format!(
                "fallback_days must be >= 0, got {}",
                self.fallback_days
            )));
        }
        if let Some((name, days)) = self.days.iter().find(|(_, d)| **d < 0) {
            return Err(Error::Config(format!(
                "Shelf-life for '{}' must be >= 0, got {}",
                name, days
            )));
        }
        Ok(())
    }
}

/// Raw table structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawTable {
    version: Option<String>,
    fallback_days: Option<i64>,
    days: Option<BTreeMap<String, i64>>,
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| {
        d.join("freshkeeper")
            .join("config")
            .join("shelf_life.toml")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table_matches_standard() {
        let embedded = ShelfLifeTable::parse(DEFAULT_TABLE).unwrap();
        assert_eq!(embedded, ShelfLifeTable::standard());
    }

    #[test]
    fn test_days_for_known_and_unknown() {
        let table = ShelfLifeTable::standard();
        assert_eq!(table.days_for(&FoodCategory::Meat), 3);
        assert_eq!(table.days_for(&FoodCategory::Canned), 730);
        assert_eq!(table.days_for(&FoodCategory::Other("snacks".into())), 7);
    }

    #[test]
    fn test_parse_partial_table_uses_defaults() {
        let table = ShelfLifeTable::parse("[days]\ndairy = 10\n").unwrap();
        assert_eq!(table.version, STANDARD_TABLE_VERSION);
        assert_eq!(table.fallback_days, STANDARD_FALLBACK_DAYS);
        assert_eq!(table.days_for(&FoodCategory::Dairy), 10);
        // Entries not listed fall back
        assert_eq!(table.days_for(&FoodCategory::Grains), 7);
    }

    #[test]
    fn test_negative_days_rejected() {
        let err = ShelfLifeTable::parse("[days]\nmeat = -1\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ShelfLifeTable::standard()
            .with_override(&FoodCategory::Dairy, -3)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(ShelfLifeTable::parse("days = [").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelf_life.toml");
        fs::write(
            &path,
            "version = \"household-v2\"\nfallback_days = 4\n[days]\nCheese = 21\n",
        )
        .unwrap();

        let table = ShelfLifeTable::load_from(&path).unwrap();
        assert_eq!(table.version, "household-v2");
        assert_eq!(table.days_for(&FoodCategory::Other("cheese".into())), 21);
        assert_eq!(table.days_for(&FoodCategory::Dairy), 4);
    }

    #[test]
    fn test_load_from_missing_file_uses_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let table = ShelfLifeTable::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(table, ShelfLifeTable::standard());
    }
}
