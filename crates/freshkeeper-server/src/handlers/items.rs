//! Food item handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{current_user, AppError, AppState, MAX_BODY_SIZE};
use freshkeeper_core::models::{FoodItem, ItemStatus, NewFoodItem};
use freshkeeper_core::parse_purchase_date;

/// Request body for logging a food item
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub category: String,
    /// `YYYY-MM-DD`
    pub purchase_date: String,
    pub storage_condition: String,
    pub quantity: f64,
    pub unit: String,
}

/// Map core errors for single-item operations onto HTTP statuses
pub(crate) fn item_error(err: freshkeeper_core::Error) -> AppError {
    use freshkeeper_core::Error;
    match err {
        Error::NotFound(msg) => AppError::not_found(&msg),
        Error::InvalidTransition(msg) => AppError::conflict(&msg),
        Error::InvalidData(msg) => AppError::bad_request(&msg),
        other => other.into(),
    }
}

/// Load an item owned by `user_id`; other users' items look absent
fn owned_item(state: &AppState, user_id: i64, id: i64) -> Result<FoodItem, AppError> {
    state
        .db
        .get_food_item(id)?
        .filter(|item| item.user_id == user_id)
        .ok_or_else(|| AppError::not_found("Item not found"))
}

/// GET /api/items - List all of the user's items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<FoodItem>>, AppError> {
    let user = current_user(&state, request.headers())?;

    let items = state.db.list_food_items(user.id)?;

    state.db.log_audit(
        &user.username,
        "list",
        Some("food_item"),
        None,
        Some(&format!("count={}", items.len())),
    )?;

    Ok(Json(items))
}

/// GET /api/items/:id - Get a single item
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<FoodItem>, AppError> {
    let user = current_user(&state, request.headers())?;

    let item = owned_item(&state, user.id, id)?;

    state
        .db
        .log_audit(&user.username, "view", Some("food_item"), Some(id), None)?;

    Ok(Json(item))
}

/// POST /api/items - Log a new item with its predicted expiry
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<FoodItem>, AppError> {
    let user = current_user(&state, request.headers())?;
    let today = state.today();

    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    let req: CreateItemRequest =
        serde_json::from_slice(&bytes).map_err(|_| AppError::bad_request("Invalid JSON"))?;

    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Item name is required"));
    }
    if req.category.trim().is_empty() {
        return Err(AppError::bad_request("Category is required"));
    }
    if req.storage_condition.trim().is_empty() {
        return Err(AppError::bad_request("Storage condition is required"));
    }
    if !req.quantity.is_finite() || req.quantity < 0.0 {
        return Err(AppError::bad_request("Quantity must be zero or more"));
    }
    let purchase_date = parse_purchase_date(&req.purchase_date, today).map_err(item_error)?;

    let new_item = NewFoodItem {
        name: req.name.trim().to_string(),
        category: req.category.into(),
        purchase_date,
        storage_condition: req.storage_condition.into(),
        quantity: req.quantity,
        unit: req.unit.trim().to_string(),
    };

    let predicted_expiry = state.predictor.predict(
        &new_item.category,
        &new_item.storage_condition,
        purchase_date,
        today,
    );

    let id = state
        .db
        .insert_food_item(user.id, &new_item, predicted_expiry, Utc::now())
        .map_err(item_error)?;

    state.db.log_audit(
        &user.username,
        "create",
        Some("food_item"),
        Some(id),
        Some(&format!(
            "name={}, category={}, expiry={}",
            new_item.name, new_item.category, predicted_expiry
        )),
    )?;

    let item = state
        .db
        .get_food_item(id)?
        .ok_or_else(|| AppError::not_found("Item not found after creation"))?;

    Ok(Json(item))
}

/// POST /api/items/:id/status/:status - Mark an item consumed or wasted
pub async fn update_item_status(
    State(state): State<Arc<AppState>>,
    Path((id, status)): Path<(i64, String)>,
    request: Request,
) -> Result<Json<FoodItem>, AppError> {
    let user = current_user(&state, request.headers())?;

    let status: ItemStatus = status
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;
    if status == ItemStatus::Active {
        return Err(AppError::bad_request("Status must be consumed or wasted"));
    }

    owned_item(&state, user.id, id)?;
    state.db.update_item_status(id, status).map_err(item_error)?;

    state.db.log_audit(
        &user.username,
        "update",
        Some("food_item"),
        Some(id),
        Some(&format!("status={}", status)),
    )?;

    Ok(Json(owned_item(&state, user.id, id)?))
}
