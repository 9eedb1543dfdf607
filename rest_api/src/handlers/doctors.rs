// rest_api/src/handlers/doctors.rs

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::handlers::parse_object_id;
use crate::{require_admin, AppState, RestApiError};
use models::{Doctor, DoctorStatus, NewDoctor};

#[derive(Debug, Deserialize)]
pub struct DoctorStatusUpdate {
    pub status: String,
}

// Handler for POST /api/v1/doctors (admin)
pub async fn add_doctor_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewDoctor>,
) -> Result<Json<Value>, RestApiError> {
    require_admin(&state, &headers)?;

    let doctor = Doctor::from_new_doctor(payload)?;
    let stored = state.doctors.insert_doctor(&doctor).await?;
    tracing::info!(name = %stored.name, "onboarded doctor as pending");
    Ok(Json(json!({ "success": true, "result": stored })))
}

// Handler for GET /api/v1/doctors — the public listing only ever shows
// approved doctors.
pub async fn list_doctors_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, RestApiError> {
    let doctors = state
        .doctors
        .list_doctors(Some(DoctorStatus::Approved))
        .await?;
    Ok(Json(json!({ "success": true, "result": doctors })))
}

// Handler for GET /api/v1/doctors/all (admin)
pub async fn list_all_doctors_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, RestApiError> {
    require_admin(&state, &headers)?;
    let doctors = state.doctors.list_doctors(None).await?;
    Ok(Json(json!({ "success": true, "result": doctors })))
}

// Handler for GET /api/v1/doctors/{id}
pub async fn get_doctor_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, RestApiError> {
    let id = parse_object_id(&id)?;
    match state.doctors.get_doctor(&id).await? {
        Some(doctor) => Ok(Json(json!({ "success": true, "result": doctor }))),
        None => Err(RestApiError::NotFound(format!(
            "doctor {} was not found",
            id.to_hex()
        ))),
    }
}

// Handler for PATCH /api/v1/doctors/{id}/status (admin)
pub async fn set_doctor_status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<DoctorStatusUpdate>,
) -> Result<Json<Value>, RestApiError> {
    require_admin(&state, &headers)?;

    let id = parse_object_id(&id)?;
    let status = DoctorStatus::from_str(&payload.status)?;

    if !state.doctors.set_doctor_status(&id, status).await? {
        return Err(RestApiError::NotFound(format!(
            "doctor {} was not found",
            id.to_hex()
        )));
    }

    tracing::info!(doctor = %id.to_hex(), %status, "changed doctor status");
    Ok(Json(json!({
        "success": true,
        "result": { "id": id.to_hex(), "status": status.as_str() },
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use mongodb::bson::oid::ObjectId;

    const ADMIN_TOKEN: &str = "test-admin-token";

    fn test_state() -> AppState {
        AppState::with_memory_engines(ADMIN_TOKEN)
    }

    fn admin_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(crate::ADMIN_TOKEN_HEADER, ADMIN_TOKEN.parse().unwrap());
        headers
    }

    fn onboarding(name: &str) -> NewDoctor {
        NewDoctor {
            name: name.to_string(),
            specialization: Some("general practice".to_string()),
            email: None,
            phone: None,
        }
    }

    async fn onboard(state: &AppState, name: &str) -> ObjectId {
        let response = add_doctor_handler(
            State(state.clone()),
            admin_headers(),
            Json(onboarding(name)),
        )
        .await
        .unwrap();
        ObjectId::parse_str(response.0["result"]["_id"]["$oid"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn should_onboard_doctor_as_pending() {
        let state = test_state();
        let response = add_doctor_handler(
            State(state.clone()),
            admin_headers(),
            Json(onboarding("Dr. Grey")),
        )
        .await
        .unwrap();
        assert_eq!(response.0["result"]["status"], "pending");
    }

    #[tokio::test]
    async fn should_forbid_onboarding_without_admin_header() {
        let state = test_state();
        let err = add_doctor_handler(State(state), HeaderMap::new(), Json(onboarding("Dr. Grey")))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_hide_pending_doctors_from_public_listing() {
        let state = test_state();
        let id = onboard(&state, "Dr. Grey").await;

        let public = list_doctors_handler(State(state.clone())).await.unwrap();
        assert!(public.0["result"].as_array().unwrap().is_empty());

        set_doctor_status_handler(
            State(state.clone()),
            admin_headers(),
            Path(id.to_hex()),
            Json(DoctorStatusUpdate {
                status: "approved".to_string(),
            }),
        )
        .await
        .unwrap();

        let public = list_doctors_handler(State(state)).await.unwrap();
        assert_eq!(public.0["result"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_doctor() {
        let state = test_state();
        let err = get_doctor_handler(State(state), Path(ObjectId::new().to_hex()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_malformed_doctor_id() {
        let state = test_state();
        let err = get_doctor_handler(State(state), Path("garbage".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, RestApiError::MalformedId(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_reject_unknown_status_token() {
        let state = test_state();
        let id = onboard(&state, "Dr. Grey").await;
        let err = set_doctor_status_handler(
            State(state),
            admin_headers(),
            Path(id.to_hex()),
            Json(DoctorStatusUpdate {
                status: "fired".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RestApiError::InvalidInput(_)));
    }
}
