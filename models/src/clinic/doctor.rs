// models/src/clinic/doctor.rs

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

/// Approval state of an onboarded doctor. New doctors always start out
/// pending and only become visible to patients once approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    Pending,
    Approved,
}

impl Default for DoctorStatus {
    fn default() -> Self {
        DoctorStatus::Pending
    }
}

impl DoctorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoctorStatus::Pending => "pending",
            DoctorStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoctorStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(DoctorStatus::Pending),
            "approved" => Ok(DoctorStatus::Approved),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub status: DoctorStatus,
    pub created_at: DateTime,
}

impl Doctor {
    /// Creates a pending `Doctor` document from a `NewDoctor` DTO.
    /// Onboarding never produces an approved doctor directly.
    pub fn from_new_doctor(new_doctor: NewDoctor) -> ValidationResult<Self> {
        let name = new_doctor.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        Ok(Doctor {
            id: None,
            name,
            specialization: new_doctor.specialization,
            email: new_doctor.email.map(|e| crate::User::normalize_email(&e)),
            phone: new_doctor.phone,
            status: DoctorStatus::Pending,
            created_at: DateTime::now(),
        })
    }
}
