//! Stateless engine helpers: tier lookup and prediction preview

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::items::item_error;
use crate::{get_user_name, AppError, AppState};
use freshkeeper_core::{
    classify,
    models::{AlertTier, FoodCategory, StorageCondition},
    parse_purchase_date,
};

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub days_remaining: i64,
    pub tier: AlertTier,
    pub color: &'static str,
    pub label: &'static str,
}

/// GET /api/classify/:days - Alert tier for a number of days remaining
pub async fn classify_days(Path(days): Path<i64>) -> Json<ClassifyResponse> {
    let tier = classify(days);
    Json(ClassifyResponse {
        days_remaining: days,
        tier,
        color: tier.color(),
        label: tier.label(),
    })
}

#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    pub category: String,
    pub storage_condition: String,
    pub purchase_date: String,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub category: FoodCategory,
    pub storage_condition: StorageCondition,
    pub purchase_date: NaiveDate,
    pub predicted_expiry: NaiveDate,
    pub strategy: String,
}

/// GET /api/predict - Preview the expiry date for an item without storing it
pub async fn preview_prediction(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PredictQuery>,
    request: Request,
) -> Result<Json<PredictionResponse>, AppError> {
    let user_name = get_user_name(request.headers());
    let today = state.today();

    let purchase_date = parse_purchase_date(&params.purchase_date, today).map_err(item_error)?;
    let category: FoodCategory = params.category.into();
    let storage_condition: StorageCondition = params.storage_condition.into();

    let predicted_expiry =
        state
            .predictor
            .predict(&category, &storage_condition, purchase_date, today);

    state.db.log_audit(
        &user_name,
        "predict",
        Some("food_item"),
        None,
        Some(&format!("category={}, expiry={}", category, predicted_expiry)),
    )?;

    Ok(Json(PredictionResponse {
        category,
        storage_condition,
        purchase_date,
        predicted_expiry,
        strategy: state.predictor.strategy_name().to_string(),
    }))
}
