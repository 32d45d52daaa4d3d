//! Waste analytics handler

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use serde::Deserialize;

use crate::{current_user, AppError, AppState};
use freshkeeper_core::{models::AnalyticsSummary, summarize};

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Return the monthly series in chronological order
    #[serde(default)]
    pub sorted: bool,
}

/// GET /api/analytics - Waste totals and monthly series over all of the user's items
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsQuery>,
    request: Request,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let user = current_user(&state, request.headers())?;

    let items = state.db.list_food_items(user.id)?;
    let mut summary = summarize(&items);
    if params.sorted {
        summary.monthly = summary.monthly.sorted();
    }

    state.db.log_audit(
        &user.username,
        "view",
        Some("analytics"),
        None,
        Some(&format!(
            "total={}, wasted={}",
            summary.total_items, summary.wasted_items
        )),
    )?;

    Ok(Json(summary))
}
