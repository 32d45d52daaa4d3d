//! Dashboard aggregation over a user's active items

use chrono::NaiveDate;

use crate::alert::classify;
use crate::models::{DashboardStats, ExpiringItem, FoodItem};

/// Items with at most this many days left are listed as expiring soon
pub const EXPIRING_SOON_DAYS: i64 = 3;

/// Build dashboard statistics for `items` as of `today`
///
/// The caller passes active items only; no status filtering happens here.
/// `expiring_soon` keeps the input order.
pub fn build_dashboard(items: &[FoodItem], today: NaiveDate) -> DashboardStats {
    let expiring_soon: Vec<ExpiringItem> = items
        .iter()
        .filter_map(|item| {
            let days_left = item.days_left(today);
            (days_left <= EXPIRING_SOON_DAYS).then(|| ExpiringItem {
                item: item.clone(),
                days_left,
                tier: classify(days_left),
            })
        })
        .collect();

    DashboardStats {
        total_items: items.len(),
        items_expiring_soon: expiring_soon.len(),
        expiring_soon,
    }
}
