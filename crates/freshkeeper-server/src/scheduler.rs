//! Background task scheduler for expiry reminders
//!
//! Provides optional scheduled reminder delivery that can be enabled
//! via environment variables:
//!
//! - `FRESHKEEPER_REMINDER_SCHEDULE`: Interval in hours (e.g., "24" for daily)
//! - `FRESHKEEPER_REMINDER_INCLUDE_GREEN`: Also send notices for items with
//!   more than 30 days left ("true"/"1", default: false)
//!
//! Each pass composes reminders for every user's active items and hands
//! them to the notification sink.

use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::interval;
use tracing::{error, info, warn};

use freshkeeper_core::{
    compose_reminders, dispatch, Database, DispatchReport, LogSink, NotificationSink,
};

pub const SCHEDULE_ENV: &str = "FRESHKEEPER_REMINDER_SCHEDULE";
pub const INCLUDE_GREEN_ENV: &str = "FRESHKEEPER_REMINDER_INCLUDE_GREEN";

const SECS_PER_HOUR: u64 = 3600;

/// Configuration for scheduled reminders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderScheduleConfig {
    /// Interval between reminder passes in hours
    pub interval_hours: u64,
    /// Send notices for items that are still far from expiry
    pub include_green: bool,
}

impl ReminderScheduleConfig {
    /// Parse configuration from environment variables
    ///
    /// Returns None if scheduling is not configured (FRESHKEEPER_REMINDER_SCHEDULE not set)
    pub fn from_env() -> Option<Self> {
        Self::from_values(
            std::env::var(SCHEDULE_ENV).ok().as_deref(),
            std::env::var(INCLUDE_GREEN_ENV).ok().as_deref(),
        )
    }

    fn from_values(schedule: Option<&str>, include_green: Option<&str>) -> Option<Self> {
        let interval_hours: u64 = schedule.and_then(|s| s.trim().parse().ok())?;

        if interval_hours == 0 {
            warn!("{} is 0, scheduled reminders disabled", SCHEDULE_ENV);
            return None;
        }
        if interval_hours.checked_mul(SECS_PER_HOUR).is_none() {
            warn!(
                "{} of {} hours is out of range, scheduled reminders disabled",
                SCHEDULE_ENV, interval_hours
            );
            return None;
        }

        let include_green = include_green
            .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Some(Self {
            interval_hours,
            include_green,
        })
    }

    /// Time between passes; `interval_hours` is range-checked on parse
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.saturating_mul(SECS_PER_HOUR))
    }
}

/// Start the reminder scheduler as a background task
///
/// This function spawns a tokio task that runs indefinitely, dispatching
/// reminders at the configured interval.
pub fn start_reminder_scheduler(db: Database, config: ReminderScheduleConfig) {
    info!(
        "Starting reminder scheduler: every {} hours (include green: {})",
        config.interval_hours, config.include_green
    );

    tokio::spawn(async move {
        let sink = LogSink;
        let mut ticker = interval(config.interval());

        // Skip the first immediate tick
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let today = chrono::Local::now().date_naive();
            info!("Running scheduled reminders for {}", today);

            match run_reminder_pass(&db, &sink, today, config.include_green) {
                Ok(report) => {
                    info!(
                        "Scheduled reminders completed: {} delivered, {} failed, {} user(s) skipped",
                        report.delivered, report.failed, report.skipped_users
                    );
                }
                Err(e) => {
                    error!("Scheduled reminders failed: {}", e);
                }
            }
        }
    });
}

/// Outcome of one scheduled pass over all users
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderPassReport {
    pub delivered: usize,
    pub failed: usize,
    /// Users whose items could not be loaded
    pub skipped_users: usize,
}

/// Compose and dispatch reminders for every user
///
/// A user whose items cannot be loaded is skipped; the rest still get
/// their reminders.
pub(crate) fn run_reminder_pass(
    db: &Database,
    sink: &dyn NotificationSink,
    today: NaiveDate,
    include_green: bool,
) -> Result<ReminderPassReport, String> {
    let users = db
        .list_users()
        .map_err(|e| format!("Failed to list users: {}", e))?;

    let mut total = ReminderPassReport::default();
    for user in &users {
        let items = match db.list_active_items(user.id) {
            Ok(items) => items,
            Err(e) => {
                warn!(user = %user.username, error = %e, "Skipping reminders for user");
                total.skipped_users += 1;
                continue;
            }
        };

        let notices = compose_reminders(user, &items, today, include_green);
        if notices.is_empty() {
            continue;
        }

        let report: DispatchReport = dispatch(sink, &notices);
        total.delivered += report.delivered;
        total.failed += report.failed;
    }

    // Log to audit (as "scheduler" user)
    if let Err(e) = db.log_audit(
        "scheduler",
        "reminders_scheduled",
        Some("reminder"),
        None,
        Some(&format!(
            "sink={}, delivered={}, failed={}, skipped_users={}",
            sink.name(),
            total.delivered,
            total.failed,
            total.skipped_users
        )),
    ) {
        warn!("Failed to log scheduled reminders to audit: {}", e);
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use freshkeeper_core::models::{FoodCategory, NewFoodItem, StorageCondition};

    #[test]
    fn test_config_not_set() {
        assert!(ReminderScheduleConfig::from_values(None, None).is_none());
        assert!(ReminderScheduleConfig::from_values(Some("daily"), None).is_none());
    }

    #[test]
    fn test_config_zero() {
        assert!(ReminderScheduleConfig::from_values(Some("0"), Some("true")).is_none());
    }

    #[test]
    fn test_config_out_of_range() {
        let max = u64::MAX.to_string();
        assert!(ReminderScheduleConfig::from_values(Some(&max), None).is_none());

        let config = ReminderScheduleConfig::from_values(Some("168"), None).unwrap();
        assert_eq!(config.interval(), Duration::from_secs(168 * 3600));
    }

    #[test]
    fn test_config_parses_include_green() {
        let config = ReminderScheduleConfig::from_values(Some("24"), None).unwrap();
        assert_eq!(config.interval_hours, 24);
        assert!(!config.include_green);

        let config = ReminderScheduleConfig::from_values(Some(" 12 "), Some("TRUE")).unwrap();
        assert_eq!(config.interval_hours, 12);
        assert!(config.include_green);
    }

    #[test]
    fn test_reminder_pass_covers_all_users() {
        let db = Database::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();

        for (user, name, category, expiry) in [
            ("alice", "Milk", "dairy", (2025, 9, 4)),
            ("bob", "Ham", "meat", (2025, 9, 20)),
            ("bob", "Rice", "grains", (2026, 9, 1)),
        ] {
            let user = db.ensure_user(user).unwrap();
            let item = NewFoodItem {
                name: name.into(),
                category: FoodCategory::from(category.to_string()),
                purchase_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                storage_condition: StorageCondition::Refrigerated,
                quantity: 1.0,
                unit: "pcs".into(),
            };
            let expiry = NaiveDate::from_ymd_opt(expiry.0, expiry.1, expiry.2).unwrap();
            db.insert_food_item(user.id, &item, expiry, Utc::now())
                .unwrap();
        }

        // Rice is far from expiry and stays quiet unless green is requested
        let report = run_reminder_pass(&db, &LogSink, today, false).unwrap();
        assert_eq!(report.delivered, 2);
        assert_eq!(report.failed, 0);

        let report = run_reminder_pass(&db, &LogSink, today, true).unwrap();
        assert_eq!(report.delivered, 3);

        let audit = db.list_audit_log(1).unwrap();
        assert_eq!(audit[0].user_name, "scheduler");
        assert_eq!(audit[0].action, "reminders_scheduled");
    }

    #[test]
    fn test_reminder_pass_skips_unreadable_user() {
        let db = Database::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();

        let alice = db.ensure_user("alice").unwrap();
        let bob = db.ensure_user("bob").unwrap();

        // Legacy row with a date the reader cannot parse
        db.conn()
            .unwrap()
            .execute(
                "INSERT INTO food_items (user_id, name, category, purchase_date, predicted_expiry, \
                 storage_condition, quantity, unit, created_at) \
                 VALUES (?, 'Milk', 'dairy', '09/01/2025', '2025-09-08', 'refrigerated', 1, 'l', \
                 '2025-09-01 08:00:00')",
                [alice.id],
            )
            .unwrap();

        let item = NewFoodItem {
            name: "Ham".into(),
            category: FoodCategory::Meat,
            purchase_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            storage_condition: StorageCondition::Refrigerated,
            quantity: 1.0,
            unit: "pcs".into(),
        };
        let expiry = NaiveDate::from_ymd_opt(2025, 9, 4).unwrap();
        db.insert_food_item(bob.id, &item, expiry, Utc::now())
            .unwrap();

        let report = run_reminder_pass(&db, &LogSink, today, false).unwrap();
        assert_eq!(report.skipped_users, 1);
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failed, 0);

        let audit = db.list_audit_log(1).unwrap();
        assert_eq!(audit[0].action, "reminders_scheduled");
        assert!(audit[0]
            .details
            .as_deref()
            .unwrap()
            .contains("skipped_users=1"));
    }
}
