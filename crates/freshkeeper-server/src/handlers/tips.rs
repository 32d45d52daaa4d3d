//! Preservation tip handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use serde::Deserialize;

use crate::{get_user_name, AppError, AppState};
use freshkeeper_core::models::PreservationTip;

#[derive(Debug, Deserialize)]
pub struct TipsQuery {
    pub category: Option<String>,
}

/// GET /api/tips - Preservation tips, optionally for one category
pub async fn list_tips(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TipsQuery>,
    request: Request,
) -> Result<Json<Vec<PreservationTip>>, AppError> {
    let user_name = get_user_name(request.headers());

    let tips = state
        .db
        .list_preservation_tips(params.category.as_deref())?;

    state.db.log_audit(
        &user_name,
        "list",
        Some("preservation_tip"),
        None,
        Some(&format!(
            "category={}, count={}",
            params.category.as_deref().unwrap_or("all"),
            tips.len()
        )),
    )?;

    Ok(Json(tips))
}
