// rest_api/src/handlers/mod.rs

pub mod appointments;
pub mod doctors;
pub mod medicines;
pub mod orders;
pub mod users;

use axum::http::StatusCode;
use axum::Json;
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};

use crate::RestApiError;

// Handler for the /api/v1/health endpoint
pub async fn health_check_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "result": "clinic portal REST API is healthy" })),
    )
}

/// Parses an id from a path segment or request body into an `ObjectId`,
/// mapping failures to the malformed-id client error.
pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, RestApiError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| RestApiError::MalformedId(raw.to_string()))
}
