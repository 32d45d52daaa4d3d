//! Expiry reminder composition and delivery
//!
//! Reminders use a coarser, longer-range scale than the dashboard tiers:
//! anything more than a month out is green, one to four weeks is yellow, and
//! the final week (or past expiry) is red. Delivery goes through a
//! [`NotificationSink`]; transports live outside this crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{FoodItem, User};

/// Reminder urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderLevel {
    Green,
    Yellow,
    Red,
}

impl ReminderLevel {
    pub fn for_days_left(days_left: i64) -> Self {
        if days_left > 30 {
            Self::Green
        } else if (7..=30).contains(&days_left) {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Green => "No immediate action needed.",
            Self::Yellow => "Please review soon.",
            Self::Red => "Action required! Expiring or expired.",
        }
    }
}

impl std::fmt::Display for ReminderLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A composed reminder ready for delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderNotice {
    pub recipient: String,
    pub email: Option<String>,
    pub item_id: i64,
    pub level: ReminderLevel,
    pub days_left: i64,
    pub subject: String,
    pub body: String,
}

/// Compose one reminder per active item of `user`
///
/// Inactive items are skipped. Green reminders are only produced when
/// `include_green` is set.
pub fn compose_reminders(
    user: &User,
    items: &[FoodItem],
    today: NaiveDate,
    include_green: bool,
) -> Vec<ReminderNotice> {
    items
        .iter()
        .filter(|item| item.is_active())
        .filter_map(|item| {
            let days_left = item.days_left(today);
            let level = ReminderLevel::for_days_left(days_left);
            if level == ReminderLevel::Green && !include_green {
                return None;
            }
            Some(compose_notice(user, item, days_left, level))
        })
        .collect()
}

fn compose_notice(
    user: &User,
    item: &FoodItem,
    days_left: i64,
    level: ReminderLevel,
) -> ReminderNotice {
    let subject = format!("[{}] Expiry Alert for {}", level, item.name);
    let body = format!(
        "Hello {user},\n\n\
         Your {item} ({category}) is predicted to expire on {expiry} ({days} days left).\n\
         {message}\n\n\
         Please take necessary action.\n\n\
         Best regards,\nFreshKeeper",
        user = user.username,
        item = item.name,
        category = item.category,
        expiry = item.predicted_expiry.format("%Y-%m-%d"),
        days = days_left,
        message = level.message(),
    );

    ReminderNotice {
        recipient: user.username.clone(),
        email: user.email.clone(),
        item_id: item.id,
        level,
        days_left,
        subject,
        body,
    }
}

/// Delivery target for reminders (email, push, chat, ...)
pub trait NotificationSink: Send + Sync {
    fn name(&self) -> &'static str;

    fn deliver(&self, notice: &ReminderNotice) -> Result<()>;
}

/// Sink that records each reminder as a structured log event
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    fn deliver(&self, notice: &ReminderNotice) -> Result<()> {
        info!(
            recipient = %notice.recipient,
            email = notice.email.as_deref().unwrap_or("-"),
            item_id = notice.item_id,
            level = notice.level.as_str(),
            days_left = notice.days_left,
            subject = %notice.subject,
            "Expiry reminder"
        );
        Ok(())
    }
}

/// Outcome of a dispatch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Deliver every notice, continuing past individual failures
pub fn dispatch(sink: &dyn NotificationSink, notices: &[ReminderNotice]) -> DispatchReport {
    let mut report = DispatchReport::default();
    for notice in notices {
        match sink.deliver(notice) {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                warn!(
                    sink = sink.name(),
                    item_id = notice.item_id,
                    error = %e,
                    "Failed to deliver reminder"
                );
            }
        }
    }
    report
}
