// models/src/clinic/appointment.rs

use std::fmt;
use std::str::FromStr;

use chrono::DateTime as ChronoDateTime;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Pending
    }
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "completed" => Ok(AppointmentStatus::Completed),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// Booking request. `appointment_date` arrives as an RFC 3339 string and the
/// two ids arrive in whatever form the client kept them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub user_id: String,
    pub doctor_id: String,
    pub appointment_date: String,
}

/// A booked appointment. The user and doctor ids are kept in string form so
/// they match by plain equality regardless of where they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub doctor_id: String,
    pub appointment_date: DateTime,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub created_at: DateTime,
}

impl Appointment {
    /// Creates a pending `Appointment` from a booking request. The ids are
    /// trimmed to their canonical string form; the date must parse as
    /// RFC 3339.
    pub fn from_new_appointment(new_appointment: NewAppointment) -> ValidationResult<Self> {
        let user_id = new_appointment.user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(ValidationError::MissingField("userId"));
        }
        let doctor_id = new_appointment.doctor_id.trim().to_string();
        if doctor_id.is_empty() {
            return Err(ValidationError::MissingField("doctorId"));
        }

        let parsed = ChronoDateTime::parse_from_rfc3339(new_appointment.appointment_date.trim())
            .map_err(|_| {
                ValidationError::InvalidDateFormat(new_appointment.appointment_date.clone())
            })?;

        Ok(Appointment {
            id: None,
            user_id,
            doctor_id,
            appointment_date: DateTime::from_millis(parsed.timestamp_millis()),
            status: AppointmentStatus::Pending,
            created_at: DateTime::now(),
        })
    }
}
