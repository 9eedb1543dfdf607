// rest_api/src/handlers/medicines.rs

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::handlers::parse_object_id;
use crate::{require_admin, AppState, RestApiError};
use models::{Medicine, NewMedicine, ValidationError};

#[derive(Debug, Deserialize)]
pub struct MedicineListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StockUpdate {
    pub stock: i64,
}

// Handler for POST /api/v1/medicines (admin)
pub async fn create_medicine_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewMedicine>,
) -> Result<Json<Value>, RestApiError> {
    require_admin(&state, &headers)?;

    let medicine = Medicine::from_new_medicine(payload)?;
    let stored = state.medicines.insert_medicine(&medicine).await?;
    tracing::info!(name = %stored.name, "added medicine to catalog");
    Ok(Json(json!({ "success": true, "result": stored })))
}

// Handler for GET /api/v1/medicines[?category=...]
pub async fn list_medicines_handler(
    State(state): State<AppState>,
    Query(query): Query<MedicineListQuery>,
) -> Result<Json<Value>, RestApiError> {
    let medicines = state
        .medicines
        .list_medicines(query.category.as_deref())
        .await?;
    Ok(Json(json!({ "success": true, "result": medicines })))
}

// Handler for GET /api/v1/medicines/{id}
pub async fn get_medicine_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, RestApiError> {
    let id = parse_object_id(&id)?;
    match state.medicines.get_medicine(&id).await? {
        Some(medicine) => Ok(Json(json!({ "success": true, "result": medicine }))),
        None => Err(RestApiError::NotFound(format!(
            "medicine {} was not found",
            id.to_hex()
        ))),
    }
}

// Handler for PATCH /api/v1/medicines/{id}/stock (admin). Absolute restock;
// the decrement path belongs to order placement alone.
pub async fn set_stock_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<StockUpdate>,
) -> Result<Json<Value>, RestApiError> {
    require_admin(&state, &headers)?;

    let id = parse_object_id(&id)?;
    if payload.stock < 0 {
        return Err(ValidationError::InvalidStock(payload.stock).into());
    }

    if !state.medicines.set_stock(&id, payload.stock).await? {
        return Err(RestApiError::NotFound(format!(
            "medicine {} was not found",
            id.to_hex()
        )));
    }

    tracing::info!(medicine = %id.to_hex(), stock = payload.stock, "restocked medicine");
    Ok(Json(json!({
        "success": true,
        "result": { "id": id.to_hex(), "stock": payload.stock },
    })))
}
