//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use freshkeeper_core::db::Database;
use freshkeeper_core::models::{ItemStatus, User};
use freshkeeper_core::ExpiryPredictor;

use crate::commands::{self, truncate, ItemArgs};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()
}

fn setup_test_db() -> (Database, User) {
    let db = Database::in_memory().unwrap();
    db.seed_preservation_tips().unwrap();
    let user = db.ensure_user("household").unwrap();
    (db, user)
}

fn item(name: &str, category: &str, purchased: Option<&str>) -> ItemArgs {
    ItemArgs {
        name: name.to_string(),
        category: category.to_string(),
        storage: "refrigerated".to_string(),
        purchased: purchased.map(str::to_string),
        quantity: 1.0,
        unit: "pcs".to_string(),
    }
}

fn add(db: &Database, user: &User, name: &str, category: &str, purchased: Option<&str>) -> i64 {
    commands::cmd_add(
        db,
        user,
        &ExpiryPredictor::standard(),
        today(),
        item(name, category, purchased),
    )
    .unwrap()
}

// ========== Item Command Tests ==========

#[test]
fn test_cmd_add_predicts_expiry() {
    let (db, user) = setup_test_db();

    let id = add(&db, &user, "Milk", "dairy", Some("2025-09-01"));
    let stored = db.get_food_item(id).unwrap().unwrap();
    assert_eq!(stored.predicted_expiry, NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
    assert_eq!(stored.user_id, user.id);

    // Purchase date defaults to today
    let id = add(&db, &user, "Steak", "meat", None);
    let stored = db.get_food_item(id).unwrap().unwrap();
    assert_eq!(stored.purchase_date, today());
    assert_eq!(stored.predicted_expiry, NaiveDate::from_ymd_opt(2025, 9, 6).unwrap());
}

#[test]
fn test_cmd_add_rejects_bad_input() {
    let (db, user) = setup_test_db();
    let predictor = ExpiryPredictor::standard();

    let future = item("Milk", "dairy", Some("2025-09-04"));
    assert!(commands::cmd_add(&db, &user, &predictor, today(), future).is_err());

    let garbled = item("Milk", "dairy", Some("yesterday"));
    let err = commands::cmd_add(&db, &user, &predictor, today(), garbled).unwrap_err();
    assert!(err.to_string().contains("YYYY-MM-DD"));

    let blank = item("   ", "dairy", None);
    assert!(commands::cmd_add(&db, &user, &predictor, today(), blank).is_err());

    let mut negative = item("Milk", "dairy", None);
    negative.quantity = -2.0;
    assert!(commands::cmd_add(&db, &user, &predictor, today(), negative).is_err());

    assert!(db.list_food_items(user.id).unwrap().is_empty());
}

#[test]
fn test_cmd_list() {
    let (db, user) = setup_test_db();
    assert!(commands::cmd_list(&db, &user, today(), false).is_ok());

    add(&db, &user, "A very long item name that will be truncated", "Fermented", None);
    assert!(commands::cmd_list(&db, &user, today(), false).is_ok());
    assert!(commands::cmd_list(&db, &user, today(), true).is_ok());
}

#[test]
fn test_cmd_mark() {
    let (db, user) = setup_test_db();
    let id = add(&db, &user, "Milk", "dairy", None);

    assert!(commands::cmd_mark(&db, &user, id, "spoiled").is_err());
    assert!(commands::cmd_mark(&db, &user, id, "active").is_err());

    commands::cmd_mark(&db, &user, id, "Wasted").unwrap();
    let stored = db.get_food_item(id).unwrap().unwrap();
    assert_eq!(stored.status(), ItemStatus::Wasted);

    // One-way transition
    assert!(commands::cmd_mark(&db, &user, id, "consumed").is_err());
}

#[test]
fn test_cmd_mark_other_users_item() {
    let (db, user) = setup_test_db();
    let id = add(&db, &user, "Milk", "dairy", None);

    let bob = db.ensure_user("bob").unwrap();
    assert!(commands::cmd_mark(&db, &bob, id, "consumed").is_err());
    assert!(db.get_food_item(id).unwrap().unwrap().is_active());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_dashboard() {
    let (db, user) = setup_test_db();
    add(&db, &user, "Ham", "meat", Some("2025-08-31"));
    add(&db, &user, "Rice", "grains", None);

    assert!(commands::cmd_dashboard(&db, &user, today(), false).is_ok());
    assert!(commands::cmd_dashboard(&db, &user, today(), true).is_ok());
}

#[test]
fn test_cmd_analytics() {
    let (db, user) = setup_test_db();
    assert!(commands::cmd_analytics(&db, &user, false, false).is_ok());

    let id = add(&db, &user, "Ham", "meat", None);
    db.update_item_status(id, ItemStatus::Wasted).unwrap();
    assert!(commands::cmd_analytics(&db, &user, true, false).is_ok());
    assert!(commands::cmd_analytics(&db, &user, false, true).is_ok());
}

#[test]
fn test_cmd_classify_and_predict() {
    assert!(commands::cmd_classify(-4).is_ok());
    assert!(commands::cmd_classify(10).is_ok());

    let predictor = ExpiryPredictor::standard();
    assert!(commands::cmd_predict(&predictor, today(), "dairy", "frozen", "2025-09-01").is_ok());
    assert!(commands::cmd_predict(&predictor, today(), "dairy", "frozen", "2025-12-01").is_err());
}

// ========== Reminder Command Tests ==========

#[test]
fn test_cmd_remind() {
    let (db, user) = setup_test_db();
    add(&db, &user, "Milk", "dairy", None);
    add(&db, &user, "Beans", "canned", None);

    // Preview only: nothing dispatched
    let report = commands::cmd_remind(&db, &user, today(), false, false).unwrap();
    assert_eq!(report.delivered, 0);

    let report = commands::cmd_remind(&db, &user, today(), false, true).unwrap();
    assert_eq!(report.delivered, 1);

    let report = commands::cmd_remind(&db, &user, today(), true, true).unwrap();
    assert_eq!(report.delivered, 2);

    let audit = db.list_audit_log(1).unwrap();
    assert_eq!(audit[0].action, "reminders_sent");
    assert_eq!(audit[0].user_name, "household");
}

// ========== Tips & Export Tests ==========

#[test]
fn test_cmd_tips() {
    let (db, _user) = setup_test_db();
    assert!(commands::cmd_tips(&db, None).is_ok());
    assert!(commands::cmd_tips(&db, Some("dairy")).is_ok());
    assert!(commands::cmd_tips(&db, Some("meat")).is_ok());
}

#[test]
fn test_cmd_export() {
    let (db, user) = setup_test_db();
    add(&db, &user, "Milk", "dairy", None);
    add(&db, &user, "Kimchi", "Fermented", None);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.csv");

    let count = commands::cmd_export(&db, &user, Some(&path)).unwrap();
    assert_eq!(count, 2);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,name,category"));
    assert!(lines[2].contains("Kimchi,Fermented"));
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Milk", 10), "Milk");
    assert_eq!(truncate("Strawberry yoghurt", 10), "Strawbe...");
    assert_eq!(truncate("Crème fraîche", 8), "Crème...");
}

#[test]
fn test_open_db_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fk.db");

    let db = commands::open_db(&path, true).unwrap();
    let user = commands::open_user(&db, "alice").unwrap();
    assert_eq!(user.username, "alice");

    let (_db, again) = commands::open_session(&path, true, "alice").unwrap();
    assert_eq!(again.id, user.id);
}
