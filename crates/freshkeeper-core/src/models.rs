//! Domain models for FreshKeeper

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Food category used for shelf-life lookup
///
/// Unrecognized categories are kept verbatim in `Other` so they survive a
/// round trip through storage and still predict with the fallback duration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FoodCategory {
    Dairy,
    Meat,
    Vegetables,
    Fruits,
    Grains,
    Canned,
    Other(String),
}

impl FoodCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Dairy => "dairy",
            Self::Meat => "meat",
            Self::Vegetables => "vegetables",
            Self::Fruits => "fruits",
            Self::Grains => "grains",
            Self::Canned => "canned",
            Self::Other(raw) => raw,
        }
    }
}

impl std::str::FromStr for FoodCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "dairy" => Self::Dairy,
            "meat" => Self::Meat,
            "vegetables" => Self::Vegetables,
            "fruits" => Self::Fruits,
            "grains" => Self::Grains,
            "canned" => Self::Canned,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for FoodCategory {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<FoodCategory> for String {
    fn from(category: FoodCategory) -> Self {
        category.as_str().to_string()
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where an item is kept
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageCondition {
    Refrigerated,
    Frozen,
    Pantry,
    RoomTemp,
    Other(String),
}

impl StorageCondition {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Refrigerated => "refrigerated",
            Self::Frozen => "frozen",
            Self::Pantry => "pantry",
            Self::RoomTemp => "room_temp",
            Self::Other(raw) => raw,
        }
    }
}

impl std::str::FromStr for StorageCondition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "refrigerated" => Self::Refrigerated,
            "frozen" => Self::Frozen,
            "pantry" => Self::Pantry,
            "room_temp" | "roomtemp" => Self::RoomTemp,
            _ => Self::Other(s.trim().to_string()),
        })
    }
}

impl From<String> for StorageCondition {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(condition) => condition,
            Err(never) => match never {},
        }
    }
}

impl From<StorageCondition> for String {
    fn from(condition: StorageCondition) -> Self {
        condition.as_str().to_string()
    }
}

impl std::fmt::Display for StorageCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Active,
    Consumed,
    Wasted,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Consumed => "consumed",
            Self::Wasted => "wasted",
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "consumed" => Ok(Self::Consumed),
            "wasted" => Ok(Self::Wasted),
            _ => Err(format!("Unknown item status: {}", s)),
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A household user (no credentials are stored)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A logged food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub category: FoodCategory,
    pub purchase_date: NaiveDate,
    /// Computed once at creation and never recomputed
    pub predicted_expiry: NaiveDate,
    pub actual_expiry: Option<NaiveDate>,
    pub storage_condition: StorageCondition,
    pub quantity: f64,
    pub unit: String,
    pub is_consumed: bool,
    pub is_wasted: bool,
    pub created_at: DateTime<Utc>,
}

impl FoodItem {
    /// Neither consumed nor wasted
    pub fn is_active(&self) -> bool {
        !self.is_consumed && !self.is_wasted
    }

    pub fn status(&self) -> ItemStatus {
        if self.is_wasted {
            ItemStatus::Wasted
        } else if self.is_consumed {
            ItemStatus::Consumed
        } else {
            ItemStatus::Active
        }
    }

    /// Both terminal flags set; storage never produces this, imported data might
    pub fn has_conflicting_status(&self) -> bool {
        self.is_consumed && self.is_wasted
    }

    /// Whole days from `today` until the predicted expiry (negative once past)
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.predicted_expiry - today).num_days()
    }
}

/// A food item to be stored (before prediction and DB insertion)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFoodItem {
    pub name: String,
    pub category: FoodCategory,
    pub purchase_date: NaiveDate,
    pub storage_condition: StorageCondition,
    pub quantity: f64,
    pub unit: String,
}

/// Parse a `YYYY-MM-DD` purchase date, rejecting dates after `today`
pub fn parse_purchase_date(raw: &str, today: NaiveDate) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        Error::InvalidData(format!(
            "Invalid purchase date '{}' (expected YYYY-MM-DD)",
            raw
        ))
    })?;
    if date > today {
        return Err(Error::InvalidData(format!(
            "Purchase date {} is in the future (today is {})",
            date, today
        )));
    }
    Ok(date)
}

/// Urgency tier for an item's remaining shelf-life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTier {
    Expired,
    Expiring,
    Safe,
}

impl AlertTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Expiring => "expiring",
            Self::Safe => "safe",
        }
    }

    /// Traffic-light color shown to users
    pub fn color(&self) -> &'static str {
        match self {
            Self::Expired => "RED",
            Self::Expiring => "YELLOW",
            Self::Safe => "GREEN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Expired => "RED - Expired",
            Self::Expiring => "YELLOW - Expiring Soon",
            Self::Safe => "GREEN - Safe",
        }
    }
}

impl std::fmt::Display for AlertTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An active item close to (or past) its predicted expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiringItem {
    pub item: FoodItem,
    pub days_left: i64,
    pub tier: AlertTier,
}

/// Dashboard statistics over a user's active items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_items: usize,
    pub items_expiring_soon: usize,
    /// Items with at most three days left, in input order
    pub expiring_soon: Vec<ExpiringItem>,
}

/// Counts for one year-month bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// Year-month, e.g. "2025-09"
    pub month: String,
    pub total: usize,
    pub wasted: usize,
}

/// Sparse year-month series in order of first occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlySeries {
    buckets: Vec<MonthlyBucket>,
}

impl MonthlySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one item into `month`, creating the bucket on first sight
    pub fn record(&mut self, month: &str, wasted: bool) {
        let idx = match self.buckets.iter().position(|b| b.month == month) {
            Some(idx) => idx,
            None => {
                self.buckets.push(MonthlyBucket {
                    month: month.to_string(),
                    total: 0,
                    wasted: 0,
                });
                self.buckets.len() - 1
            }
        };
        let bucket = &mut self.buckets[idx];
        bucket.total += 1;
        if wasted {
            bucket.wasted += 1;
        }
    }

    pub fn get(&self, month: &str) -> Option<&MonthlyBucket> {
        self.buckets.iter().find(|b| b.month == month)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthlyBucket> {
        self.buckets.iter()
    }

    /// Chronological copy; "YYYY-MM" keys sort lexically
    pub fn sorted(&self) -> MonthlySeries {
        let mut buckets = self.buckets.clone();
        buckets.sort_by(|a, b| a.month.cmp(&b.month));
        MonthlySeries { buckets }
    }
}

/// Waste analytics over a user's full item history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_items: usize,
    pub wasted_items: usize,
    pub consumed_items: usize,
    pub waste_percentage: f64,
    pub monthly: MonthlySeries,
    /// Items flagged both consumed and wasted
    pub integrity_violations: usize,
}

/// A storage tip for a food category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreservationTip {
    pub id: i64,
    pub food_category: String,
    pub title: String,
    pub content: String,
    /// 1-5 stars
    pub effectiveness_rating: i64,
}
