// rest_api/src/lib.rs

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use models::ValidationError;
use storage::{
    AppointmentStorageEngine, DoctorStorageEngine, MedicineStorageEngine, OrderStorageEngine,
    StorageError, UserStorageEngine,
};

pub mod config;
pub mod handlers;

use crate::config::RestApiConfig;

/// Header carrying the admin token. Admin routes are gated by a plain
/// equality check against the configured token.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

// Define the REST API error enum
#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("malformed id '{0}'")]
    MalformedId(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for RestApiError {
    fn from(err: ValidationError) -> Self {
        RestApiError::InvalidInput(err.to_string())
    }
}

impl From<StorageError> for RestApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => RestApiError::NotFound(format!("{what} was not found")),
            StorageError::InsufficientStock { .. } => RestApiError::InvalidInput(err.to_string()),
            StorageError::InvalidId(raw) => RestApiError::MalformedId(raw),
            StorageError::Database(_) | StorageError::Internal(_) => {
                RestApiError::Storage(err.to_string())
            }
        }
    }
}

// Implement IntoResponse for RestApiError to convert it into the uniform
// failure envelope.
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RestApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            RestApiError::MalformedId(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            RestApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            RestApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            RestApiError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            RestApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(%status, "request failed: {message}");
        }

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

// Shared state for the Axum application. Handlers only ever see the engine
// traits; which backend is behind them is decided at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStorageEngine>,
    pub doctors: Arc<dyn DoctorStorageEngine>,
    pub appointments: Arc<dyn AppointmentStorageEngine>,
    pub medicines: Arc<dyn MedicineStorageEngine>,
    pub orders: Arc<dyn OrderStorageEngine>,
    admin_token: Arc<str>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStorageEngine>,
        doctors: Arc<dyn DoctorStorageEngine>,
        appointments: Arc<dyn AppointmentStorageEngine>,
        medicines: Arc<dyn MedicineStorageEngine>,
        orders: Arc<dyn OrderStorageEngine>,
        admin_token: &str,
    ) -> Self {
        Self {
            users,
            doctors,
            appointments,
            medicines,
            orders,
            admin_token: Arc::from(admin_token),
        }
    }

    /// Builds a state backed entirely by the in-memory engines. Used by the
    /// test suite and by local runs without a document store.
    pub fn with_memory_engines(admin_token: &str) -> Self {
        Self::new(
            Arc::new(storage::memory::MemoryUserStorage::default()),
            Arc::new(storage::memory::MemoryDoctorStorage::default()),
            Arc::new(storage::memory::MemoryAppointmentStorage::default()),
            Arc::new(storage::memory::MemoryMedicineStorage::default()),
            Arc::new(storage::memory::MemoryOrderStorage::default()),
            admin_token,
        )
    }

    pub fn admin_token(&self) -> &str {
        &self.admin_token
    }
}

/// Admin gate: a string comparison against the configured token, nothing
/// more. Absence and mismatch are the same failure.
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), RestApiError> {
    let supplied = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if supplied != state.admin_token() {
        return Err(RestApiError::Forbidden(
            "admin access required".to_string(),
        ));
    }
    Ok(())
}

/// Assembles the full route table under /api/v1.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health_check_handler))
        .route(
            "/api/v1/users/register",
            post(handlers::users::register_user_handler),
        )
        .route(
            "/api/v1/users/email/:email",
            get(handlers::users::get_user_by_email_handler),
        )
        .route("/api/v1/users", get(handlers::users::list_users_handler))
        .route(
            "/api/v1/doctors",
            post(handlers::doctors::add_doctor_handler)
                .get(handlers::doctors::list_doctors_handler),
        )
        .route(
            "/api/v1/doctors/all",
            get(handlers::doctors::list_all_doctors_handler),
        )
        .route(
            "/api/v1/doctors/:id",
            get(handlers::doctors::get_doctor_handler),
        )
        .route(
            "/api/v1/doctors/:id/status",
            patch(handlers::doctors::set_doctor_status_handler),
        )
        .route(
            "/api/v1/appointments",
            post(handlers::appointments::book_appointment_handler)
                .get(handlers::appointments::list_all_appointments_handler),
        )
        .route(
            "/api/v1/appointments/user/:user_id",
            get(handlers::appointments::list_appointments_for_user_handler),
        )
        .route(
            "/api/v1/appointments/:id/status",
            patch(handlers::appointments::set_appointment_status_handler),
        )
        .route(
            "/api/v1/medicines",
            post(handlers::medicines::create_medicine_handler)
                .get(handlers::medicines::list_medicines_handler),
        )
        .route(
            "/api/v1/medicines/:id",
            get(handlers::medicines::get_medicine_handler),
        )
        .route(
            "/api/v1/medicines/:id/stock",
            patch(handlers::medicines::set_stock_handler),
        )
        .route(
            "/api/v1/orders",
            post(handlers::orders::place_order_handler)
                .get(handlers::orders::list_all_orders_handler),
        )
        .route(
            "/api/v1/orders/user/:user_id",
            get(handlers::orders::list_orders_for_user_handler),
        )
        .with_state(state)
}

/// Binds the listener and serves requests until a shutdown signal arrives.
pub async fn start_server(config: &RestApiConfig, state: AppState) -> Result<(), anyhow::Error> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any)
        .allow_origin(Any);

    let app = app(state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid REST API bind address")?;

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to address: {addr}"))?;
    tracing::info!(%addr, "REST API server listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("REST API server failed to start or run")?;

    tracing::info!("REST API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
