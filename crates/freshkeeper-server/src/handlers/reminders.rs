//! Reminder preview handler

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use serde::Deserialize;

use crate::{current_user, AppError, AppState};
use freshkeeper_core::{compose_reminders, ReminderNotice};

#[derive(Debug, Deserialize)]
pub struct ReminderQuery {
    #[serde(default)]
    pub include_green: bool,
}

/// GET /api/reminders - Reminders that would be sent for the user's active items
pub async fn list_reminders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ReminderQuery>,
    request: Request,
) -> Result<Json<Vec<ReminderNotice>>, AppError> {
    let user = current_user(&state, request.headers())?;

    let items = state.db.list_active_items(user.id)?;
    let notices = compose_reminders(&user, &items, state.today(), params.include_green);

    state.db.log_audit(
        &user.username,
        "list",
        Some("reminder"),
        None,
        Some(&format!("count={}", notices.len())),
    )?;

    Ok(Json(notices))
}
