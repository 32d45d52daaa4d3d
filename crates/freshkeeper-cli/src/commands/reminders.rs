//! Reminder command implementation

use anyhow::Result;
use chrono::NaiveDate;
use freshkeeper_core::db::Database;
use freshkeeper_core::models::User;
use freshkeeper_core::{compose_reminders, dispatch, DispatchReport, LogSink, NotificationSink};

/// Print the user's reminders, dispatching them to the log sink with `send`
pub fn cmd_remind(
    db: &Database,
    user: &User,
    today: NaiveDate,
    include_green: bool,
    send: bool,
) -> Result<DispatchReport> {
    let items = db.list_active_items(user.id)?;
    let notices = compose_reminders(user, &items, today, include_green);

    if notices.is_empty() {
        println!("✅ Nothing needs attention.");
        return Ok(DispatchReport::default());
    }

    println!();
    println!("🔔 {} reminder(s) for {}", notices.len(), user.username);
    for notice in &notices {
        println!("   {}", notice.subject);
    }

    if !send {
        return Ok(DispatchReport::default());
    }

    let sink = LogSink;
    let report = dispatch(&sink, &notices);

    db.log_audit(
        &user.username,
        "reminders_sent",
        Some("reminder"),
        None,
        Some(&format!(
            "sink={}, delivered={}, failed={}",
            sink.name(),
            report.delivered,
            report.failed
        )),
    )?;

    println!();
    println!(
        "   📨 Delivered {} via {}{}",
        report.delivered,
        sink.name(),
        if report.failed > 0 {
            format!(", {} failed", report.failed)
        } else {
            String::new()
        }
    );

    Ok(report)
}
