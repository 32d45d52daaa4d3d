//! Integration tests for freshkeeper-core
//!
//! These tests exercise the full add → dashboard → status → analytics workflow.

use chrono::{NaiveDate, TimeZone, Utc};
use freshkeeper_core::{
    build_dashboard, compose_reminders,
    db::Database,
    models::{FoodCategory, ItemStatus, NewFoodItem, StorageCondition},
    summarize, ExpiryPredictor, ReminderLevel,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add_item(
    db: &Database,
    predictor: &ExpiryPredictor,
    user_id: i64,
    name: &str,
    category: FoodCategory,
    purchase: NaiveDate,
    today: NaiveDate,
    created_month: u32,
) -> i64 {
    let item = NewFoodItem {
        name: name.to_string(),
        category,
        purchase_date: purchase,
        storage_condition: StorageCondition::Refrigerated,
        quantity: 1.0,
        unit: "pcs".to_string(),
    };
    let expiry = predictor.predict(
        &item.category,
        &item.storage_condition,
        item.purchase_date,
        today,
    );
    let created_at = Utc
        .with_ymd_and_hms(2025, created_month, 2, 18, 0, 0)
        .unwrap();
    db.insert_food_item(user_id, &item, expiry, created_at)
        .expect("Failed to insert item")
}

#[test]
fn test_dashboard_workflow() {
    let db = Database::in_memory().expect("Failed to create database");
    let predictor = ExpiryPredictor::standard();
    let user = db.ensure_user("household").unwrap();
    let today = date(2025, 9, 3);

    add_item(&db, &predictor, user.id, "Milk", FoodCategory::Dairy, date(2025, 9, 1), today, 9);
    add_item(&db, &predictor, user.id, "Oats", FoodCategory::Grains, date(2025, 9, 1), today, 9);

    let items = db.list_active_items(user.id).unwrap();
    assert_eq!(items[0].predicted_expiry, date(2025, 9, 8));
    assert_eq!(items[1].predicted_expiry, date(2026, 9, 1));

    let stats = build_dashboard(&items, today);
    assert_eq!(stats.total_items, 2);
    assert_eq!(stats.items_expiring_soon, 0);
    assert!(stats.expiring_soon.is_empty());

    // Two days later the milk has three days left and shows up
    let stats = build_dashboard(&items, date(2025, 9, 5));
    assert_eq!(stats.items_expiring_soon, 1);
    assert_eq!(stats.expiring_soon[0].item.name, "Milk");
    assert_eq!(stats.expiring_soon[0].days_left, 3);
}

#[test]
fn test_analytics_workflow() {
    let db = Database::in_memory().expect("Failed to create database");
    let predictor = ExpiryPredictor::standard();
    let user = db.ensure_user("household").unwrap();
    let today = date(2025, 10, 1);

    let ham = add_item(&db, &predictor, user.id, "Ham", FoodCategory::Meat, date(2025, 9, 1), today, 9);
    let milk = add_item(&db, &predictor, user.id, "Milk", FoodCategory::Dairy, date(2025, 9, 1), today, 9);
    add_item(&db, &predictor, user.id, "Beans", FoodCategory::Canned, date(2025, 10, 1), today, 10);
    add_item(&db, &predictor, user.id, "Apples", FoodCategory::Fruits, date(2025, 10, 1), today, 10);

    db.update_item_status(ham, ItemStatus::Wasted).unwrap();
    db.update_item_status(milk, ItemStatus::Consumed).unwrap();

    // Terminal items leave the dashboard but stay in history
    assert_eq!(db.list_active_items(user.id).unwrap().len(), 2);

    let summary = summarize(&db.list_food_items(user.id).unwrap());
    assert_eq!(summary.total_items, 4);
    assert_eq!(summary.wasted_items, 1);
    assert_eq!(summary.consumed_items, 1);
    assert!((summary.waste_percentage - 25.0).abs() < 1e-9);

    let sep = summary.monthly.get("2025-09").unwrap();
    assert_eq!((sep.total, sep.wasted), (2, 1));
    let oct = summary.monthly.get("2025-10").unwrap();
    assert_eq!((oct.total, oct.wasted), (2, 0));
    assert_eq!(summary.monthly.len(), 2);
}

#[test]
fn test_reminder_workflow() {
    let db = Database::in_memory().expect("Failed to create database");
    let predictor = ExpiryPredictor::standard();
    let user = db.ensure_user("household").unwrap();
    let today = date(2025, 9, 3);

    add_item(&db, &predictor, user.id, "Steak", FoodCategory::Meat, date(2025, 9, 2), today, 9);
    add_item(&db, &predictor, user.id, "Tuna", FoodCategory::Canned, date(2025, 9, 2), today, 9);

    let items = db.list_active_items(user.id).unwrap();
    let notices = compose_reminders(&user, &items, today, false);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, ReminderLevel::Red);
    assert!(notices[0].subject.contains("Steak"));
}
