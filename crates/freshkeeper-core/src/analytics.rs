//! Waste analytics over a user's full item history

use crate::models::{AnalyticsSummary, FoodItem, MonthlySeries};

/// Summarize consumption and waste across `items`
///
/// Every item counts toward the total regardless of status. Items flagged
/// both consumed and wasted are counted in both tallies and reported in
/// `integrity_violations`.
pub fn summarize(items: &[FoodItem]) -> AnalyticsSummary {
    let mut wasted_items = 0;
    let mut consumed_items = 0;
    let mut integrity_violations = 0;
    let mut monthly = MonthlySeries::new();

    for item in items {
        if item.is_wasted {
            wasted_items += 1;
        }
        if item.is_consumed {
            consumed_items += 1;
        }
        if item.has_conflicting_status() {
            integrity_violations += 1;
            tracing::warn!(
                item_id = item.id,
                user_id = item.user_id,
                "Item is marked both consumed and wasted"
            );
        }

        let month = item.created_at.format("%Y-%m").to_string();
        monthly.record(&month, item.is_wasted);
    }

    let total_items = items.len();
    let waste_percentage = if total_items > 0 {
        wasted_items as f64 / total_items as f64 * 100.0
    } else {
        0.0
    };

    AnalyticsSummary {
        total_items,
        wasted_items,
        consumed_items,
        waste_percentage,
        monthly,
        integrity_violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodCategory, StorageCondition};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn item(id: i64, month: u32, consumed: bool, wasted: bool) -> FoodItem {
        let purchase = NaiveDate::from_ymd_opt(2025, month, 1).unwrap();
        FoodItem {
            id,
            user_id: 1,
            name: format!("item-{}", id),
            category: FoodCategory::Vegetables,
            purchase_date: purchase,
            predicted_expiry: purchase + chrono::Duration::days(5),
            actual_expiry: None,
            storage_condition: StorageCondition::Refrigerated,
            quantity: 1.0,
            unit: "kg".to_string(),
            is_consumed: consumed,
            is_wasted: wasted,
            created_at: Utc.with_ymd_and_hms(2025, month, 15, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_history() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.wasted_items, 0);
        assert_eq!(summary.consumed_items, 0);
        assert_eq!(summary.waste_percentage, 0.0);
        assert!(summary.monthly.is_empty());
        assert_eq!(summary.integrity_violations, 0);
    }

    #[test]
    fn test_quarter_wasted() {
        let items = vec![
            item(1, 9, false, true),
            item(2, 9, true, false),
            item(3, 9, false, false),
            item(4, 9, false, false),
        ];
        let summary = summarize(&items);
        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.wasted_items, 1);
        assert_eq!(summary.consumed_items, 1);
        assert!((summary.waste_percentage - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentage_matches_ratio() {
        let items: Vec<_> = (0..7).map(|i| item(i, 3, false, i < 3)).collect();
        let summary = summarize(&items);
        assert!((summary.waste_percentage - 100.0 * 3.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_buckets_are_sparse() {
        let items = vec![
            item(1, 10, false, true),
            item(2, 9, false, false),
            item(3, 10, true, false),
            item(4, 12, false, true),
        ];
        let summary = summarize(&items);

        assert_eq!(summary.monthly.len(), 3);
        let oct = summary.monthly.get("2025-10").unwrap();
        assert_eq!((oct.total, oct.wasted), (2, 1));
        let sep = summary.monthly.get("2025-09").unwrap();
        assert_eq!((sep.total, sep.wasted), (1, 0));
        assert!(summary.monthly.get("2025-11").is_none());

        let order: Vec<_> = summary.monthly.iter().map(|b| b.month.as_str()).collect();
        assert_eq!(order, vec!["2025-10", "2025-09", "2025-12"]);
    }

    #[test]
    fn test_conflicting_status_flagged_not_coerced() {
        let items = vec![item(1, 9, true, true), item(2, 9, false, false)];
        let summary = summarize(&items);
        assert_eq!(summary.wasted_items, 1);
        assert_eq!(summary.consumed_items, 1);
        assert_eq!(summary.integrity_violations, 1);
        assert!((summary.waste_percentage - 50.0).abs() < f64::EPSILON);
    }
}
