//! Dashboard handler

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};

use crate::{current_user, AppError, AppState};
use freshkeeper_core::{build_dashboard, models::DashboardStats};

/// GET /api/dashboard - Active item count and items expiring within three days
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<DashboardStats>, AppError> {
    let user = current_user(&state, request.headers())?;
    let today = state.today();

    let items = state.db.list_active_items(user.id)?;
    let stats = build_dashboard(&items, today);

    state.db.log_audit(
        &user.username,
        "view",
        Some("dashboard"),
        None,
        Some(&format!(
            "total={}, expiring_soon={}",
            stats.total_items, stats.items_expiring_soon
        )),
    )?;

    Ok(Json(stats))
}
