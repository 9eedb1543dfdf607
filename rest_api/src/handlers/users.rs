// rest_api/src/handlers/users.rs

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

use crate::{require_admin, AppState, RestApiError};
use models::{NewUser, User};

// Handler for POST /api/v1/users/register
pub async fn register_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<Json<Value>, RestApiError> {
    let user = User::from_new_user(payload)?;

    // Uniqueness comes from this pre-insert existence check; there is no
    // unique index backing it up.
    if state.users.find_by_email(&user.email).await?.is_some() {
        return Err(RestApiError::InvalidInput(format!(
            "a user with email '{}' already exists",
            user.email
        )));
    }

    let stored = state.users.insert_user(&user).await?;
    tracing::info!(email = %stored.email, "registered user");
    Ok(Json(json!({ "success": true, "result": stored })))
}

// Handler for GET /api/v1/users/email/{email}
pub async fn get_user_by_email_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>, RestApiError> {
    match state.users.find_by_email(&email).await? {
        Some(user) => Ok(Json(json!({ "success": true, "result": user }))),
        None => Err(RestApiError::NotFound(format!(
            "user with email '{email}' was not found"
        ))),
    }
}

// Handler for GET /api/v1/users (admin)
pub async fn list_users_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, RestApiError> {
    require_admin(&state, &headers)?;
    let users = state.users.list_users().await?;
    Ok(Json(json!({ "success": true, "result": users })))
}
