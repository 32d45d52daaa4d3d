//! Expiry prediction
//!
//! Predicted expiry is `purchase_date + shelf-life days`, where the days come
//! from a [`ShelfLifeTable`] keyed by food category. The predictor also
//! derives an [`ItemFeatures`] vector (storage temperature, food-type score,
//! seasonal factor) and hands it to the strategy, but the table strategy only
//! reads the category. A different model can be plugged in behind the same
//! [`ExpiryPredictor::predict`] contract by implementing [`ExpiryStrategy`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use freshkeeper_core::predict::ExpiryPredictor;
//!
//! let predictor = ExpiryPredictor::standard();
//! let expiry = predictor.predict(&category, &storage, purchase_date, today);
//! ```

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::config::ShelfLifeTable;
use crate::models::{FoodCategory, StorageCondition};

/// Inputs available to an expiry strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemFeatures {
    pub category: FoodCategory,
    pub days_since_purchase: i64,
    /// Typical storage temperature in °C
    pub storage_temp_c: i64,
    pub food_type_score: i64,
    pub seasonal_factor: f64,
}

impl ItemFeatures {
    pub fn new(
        category: &FoodCategory,
        storage_condition: &StorageCondition,
        purchase_date: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        Self {
            category: category.clone(),
            days_since_purchase: (today - purchase_date).num_days(),
            storage_temp_c: storage_temp_c(storage_condition),
            food_type_score: food_type_score(category),
            seasonal_factor: seasonal_factor(today.month()),
        }
    }
}

fn storage_temp_c(condition: &StorageCondition) -> i64 {
    match condition {
        StorageCondition::Refrigerated => 4,
        StorageCondition::Frozen => -18,
        StorageCondition::Pantry => 20,
        StorageCondition::RoomTemp => 22,
        StorageCondition::Other(_) => 20,
    }
}

fn food_type_score(category: &FoodCategory) -> i64 {
    match category {
        FoodCategory::Dairy => 3,
        FoodCategory::Meat => 2,
        FoodCategory::Vegetables => 5,
        FoodCategory::Fruits => 4,
        FoodCategory::Grains => 8,
        FoodCategory::Canned => 10,
        FoodCategory::Other(_) => 5,
    }
}

fn seasonal_factor(month: u32) -> f64 {
    match month {
        6..=8 => 0.8,
        12 | 1 | 2 => 1.2,
        _ => 1.0,
    }
}

/// Strategy for turning item features into a shelf-life
pub trait ExpiryStrategy: Send + Sync {
    /// Identifier recorded alongside predictions (e.g. the table version)
    fn name(&self) -> &str;

    /// Shelf-life in days; must be non-negative
    fn shelf_life_days(&self, features: &ItemFeatures) -> i64;
}

/// Category lookup against a shelf-life table
#[derive(Debug, Clone, Default)]
pub struct TableStrategy {
    table: ShelfLifeTable,
}

impl TableStrategy {
    pub fn new(table: ShelfLifeTable) -> Self {
        Self { table }
    }
}

impl ExpiryStrategy for TableStrategy {
    fn name(&self) -> &str {
        &self.table.version
    }

    fn shelf_life_days(&self, features: &ItemFeatures) -> i64 {
        self.table.days_for(&features.category)
    }
}

/// Predicts expiry dates through an [`ExpiryStrategy`]
pub struct ExpiryPredictor {
    strategy: Box<dyn ExpiryStrategy>,
}

impl Default for ExpiryPredictor {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExpiryPredictor {
    /// Predictor backed by the built-in shelf-life table
    pub fn standard() -> Self {
        Self::with_table(ShelfLifeTable::standard())
    }

    pub fn with_table(table: ShelfLifeTable) -> Self {
        Self::with_strategy(Box::new(TableStrategy::new(table)))
    }

    pub fn with_strategy(strategy: Box<dyn ExpiryStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Predict the expiry date of an item bought on `purchase_date`
    ///
    /// `today` only feeds the feature vector; it is explicit so callers
    /// control the clock. Never returns a date before `purchase_date`.
    pub fn predict(
        &self,
        category: &FoodCategory,
        storage_condition: &StorageCondition,
        purchase_date: NaiveDate,
        today: NaiveDate,
    ) -> NaiveDate {
        let features = ItemFeatures::new(category, storage_condition, purchase_date, today);
        let days = self.strategy.shelf_life_days(&features).max(0);

        tracing::debug!(
            strategy = self.strategy.name(),
            category = %category,
            days,
            "Predicted shelf-life"
        );

        purchase_date
            .checked_add_days(Days::new(days as u64))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Predict with the built-in shelf-life table
pub fn predict(
    category: &FoodCategory,
    storage_condition: &StorageCondition,
    purchase_date: NaiveDate,
    today: NaiveDate,
) -> NaiveDate {
    ExpiryPredictor::standard().predict(category, storage_condition, purchase_date, today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_table_lookup_for_every_category() {
        let purchase = date(2025, 9, 1);
        let today = date(2025, 9, 3);
        let expected = [
            (FoodCategory::Dairy, 7),
            (FoodCategory::Meat, 3),
            (FoodCategory::Vegetables, 5),
            (FoodCategory::Fruits, 7),
            (FoodCategory::Grains, 365),
            (FoodCategory::Canned, 730),
        ];
        for (category, days) in expected {
            let got = predict(&category, &StorageCondition::Pantry, purchase, today);
            assert_eq!(got, purchase + chrono::Duration::days(days), "{}", category);
        }
    }

    #[test]
    fn test_unknown_category_defaults_to_seven_days() {
        let purchase = date(2025, 9, 1);
        let got = predict(
            &FoodCategory::Other("snacks".into()),
            &StorageCondition::Pantry,
            purchase,
            purchase,
        );
        assert_eq!(got, date(2025, 9, 8));
    }

    #[test]
    fn test_storage_and_today_do_not_change_prediction() {
        let predictor = ExpiryPredictor::standard();
        let purchase = date(2025, 7, 1);
        let baseline = predictor.predict(
            &FoodCategory::Dairy,
            &StorageCondition::Refrigerated,
            purchase,
            date(2025, 7, 1),
        );
        for storage in [
            StorageCondition::Frozen,
            StorageCondition::Pantry,
            StorageCondition::RoomTemp,
            StorageCondition::Other("car boot".into()),
        ] {
            for today in [date(2025, 1, 15), date(2025, 7, 4), date(2026, 12, 1)] {
                assert_eq!(
                    predictor.predict(&FoodCategory::Dairy, &storage, purchase, today),
                    baseline
                );
            }
        }
    }

    #[test]
    fn test_spec_scenario_dairy_and_grains() {
        let purchase = date(2025, 9, 1);
        let today = date(2025, 9, 3);
        assert_eq!(
            predict(&FoodCategory::Dairy, &StorageCondition::Refrigerated, purchase, today),
            date(2025, 9, 8)
        );
        assert_eq!(
            predict(&FoodCategory::Grains, &StorageCondition::Pantry, purchase, today),
            date(2026, 9, 1)
        );
    }

    #[test]
    fn test_never_before_purchase_and_saturates() {
        struct Negative;
        impl ExpiryStrategy for Negative {
            fn name(&self) -> &str {
                "negative"
            }
            fn shelf_life_days(&self, _: &ItemFeatures) -> i64 {
                -10
            }
        }

        let predictor = ExpiryPredictor::with_strategy(Box::new(Negative));
        let purchase = date(2025, 9, 1);
        let got = predictor.predict(&FoodCategory::Meat, &StorageCondition::Frozen, purchase, purchase);
        assert_eq!(got, purchase);

        let late = predict(&FoodCategory::Canned, &StorageCondition::Pantry, NaiveDate::MAX, NaiveDate::MAX);
        assert_eq!(late, NaiveDate::MAX);
    }

    #[test]
    fn test_feature_scaffold() {
        let features = ItemFeatures::new(
            &FoodCategory::Grains,
            &StorageCondition::Frozen,
            date(2025, 12, 1),
            date(2025, 12, 11),
        );
        assert_eq!(features.days_since_purchase, 10);
        assert_eq!(features.storage_temp_c, -18);
        assert_eq!(features.food_type_score, 8);
        assert_eq!(features.seasonal_factor, 1.2);

        let summer = ItemFeatures::new(
            &FoodCategory::Other("x".into()),
            &StorageCondition::Other("y".into()),
            date(2025, 7, 1),
            date(2025, 7, 1),
        );
        assert_eq!(summer.storage_temp_c, 20);
        assert_eq!(summer.food_type_score, 5);
        assert_eq!(summer.seasonal_factor, 0.8);
    }

    #[test]
    fn test_custom_table_and_strategy_name() {
        let table = ShelfLifeTable::standard()
            .with_override(&FoodCategory::Meat, 2)
            .unwrap();
        let predictor = ExpiryPredictor::with_table(table);
        assert_eq!(predictor.strategy_name(), "category-v1");
        assert_eq!(
            predictor.predict(
                &FoodCategory::Meat,
                &StorageCondition::Refrigerated,
                date(2025, 9, 1),
                date(2025, 9, 1)
            ),
            date(2025, 9, 3)
        );
    }
}
