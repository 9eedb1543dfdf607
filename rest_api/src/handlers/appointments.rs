// rest_api/src/handlers/appointments.rs

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::handlers::parse_object_id;
use crate::{require_admin, AppState, RestApiError};
use models::{Appointment, AppointmentStatus, NewAppointment};

#[derive(Debug, Deserialize)]
pub struct AppointmentStatusUpdate {
    pub status: String,
}

// Handler for POST /api/v1/appointments
pub async fn book_appointment_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewAppointment>,
) -> Result<Json<Value>, RestApiError> {
    let appointment = Appointment::from_new_appointment(payload)?;

    // The references stay strings in the document, but they must at least
    // be well-formed ids.
    parse_object_id(&appointment.user_id)?;
    parse_object_id(&appointment.doctor_id)?;

    let stored = state.appointments.insert_appointment(&appointment).await?;
    tracing::info!(
        user = %stored.user_id,
        doctor = %stored.doctor_id,
        "booked appointment"
    );
    Ok(Json(json!({ "success": true, "result": stored })))
}

// Handler for GET /api/v1/appointments/user/{user_id}
pub async fn list_appointments_for_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, RestApiError> {
    let appointments = state.appointments.list_for_user(&user_id).await?;
    Ok(Json(json!({ "success": true, "result": appointments })))
}

// Handler for GET /api/v1/appointments (admin)
pub async fn list_all_appointments_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, RestApiError> {
    require_admin(&state, &headers)?;
    let appointments = state.appointments.list_all().await?;
    Ok(Json(json!({ "success": true, "result": appointments })))
}

// Handler for PATCH /api/v1/appointments/{id}/status (admin)
pub async fn set_appointment_status_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<AppointmentStatusUpdate>,
) -> Result<Json<Value>, RestApiError> {
    require_admin(&state, &headers)?;

    let id = parse_object_id(&id)?;
    let status = AppointmentStatus::from_str(&payload.status)?;

    if !state.appointments.set_appointment_status(&id, status).await? {
        return Err(RestApiError::NotFound(format!(
            "appointment {} was not found",
            id.to_hex()
        )));
    }

    tracing::info!(appointment = %id.to_hex(), %status, "changed appointment status");
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

    fn booking(user_id: &str, doctor_id: &str) -> NewAppointment {
        NewAppointment {
            user_id: user_id.to_string(),
            doctor_id: doctor_id.to_string(),
            appointment_date: "2026-09-01T10:30:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn should_book_appointment_with_pending_status() {
        let state = test_state();
        let user_id = ObjectId::new().to_hex();
        let response = book_appointment_handler(
            State(state.clone()),
            Json(booking(&user_id, &ObjectId::new().to_hex())),
        )
        .await
        .unwrap();
        assert_eq!(response.0["result"]["status"], "pending");

        let listed =
            list_appointments_for_user_handler(State(state), Path(user_id))
                .await
                .unwrap();
        assert_eq!(listed.0["result"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_reject_booking_with_malformed_doctor_id() {
        let state = test_state();
        let err = book_appointment_handler(
            State(state),
            Json(booking(&ObjectId::new().to_hex(), "not-a-doctor-id")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RestApiError::MalformedId(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_reject_booking_with_bad_date() {
        let state = test_state();
        let mut request = booking(&ObjectId::new().to_hex(), &ObjectId::new().to_hex());
        request.appointment_date = "tomorrow-ish".to_string();
        let err = book_appointment_handler(State(state), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, RestApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn should_forbid_full_listing_without_admin_header() {
        let state = test_state();
        let err = list_all_appointments_handler(State(state), HeaderMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn should_transition_appointment_status() {
        let state = test_state();
        let response = book_appointment_handler(
            State(state.clone()),
            Json(booking(
                &ObjectId::new().to_hex(),
                &ObjectId::new().to_hex(),
            )),
        )
        .await
        .unwrap();
        let id = response.0["result"]["_id"]["$oid"].as_str().unwrap().to_string();

        let updated = set_appointment_status_handler(
            State(state),
            admin_headers(),
            Path(id),
            Json(AppointmentStatusUpdate {
                status: "confirmed".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.0["result"]["status"], "confirmed");
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_appointment() {
        let state = test_state();
        let err = set_appointment_status_handler(
            State(state),
            admin_headers(),
            Path(ObjectId::new().to_hex()),
            Json(AppointmentStatusUpdate {
                status: "cancelled".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
