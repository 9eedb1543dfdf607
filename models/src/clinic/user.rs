// models/src/clinic/user.rs

use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

/// Role assigned to a registration that does not ask for one.
pub const DEFAULT_USER_ROLE: &str = "user";

fn default_role() -> String {
    DEFAULT_USER_ROLE.to_string()
}

// --- DTO for New User Registration ---
// This struct is used when receiving new user registration data via the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
}

// --- Stored User Struct ---
// This struct represents how a User is stored in the `users` collection.
// Email uniqueness is enforced by a pre-insert existence check in the
// register flow, not by a database constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    // Old records without a role still deserialize as plain users.
    #[serde(default = "default_role")]
    pub role: String,
    pub created_at: DateTime,
}

impl User {
    /// Normalizes an email address to its matching form: trimmed and lowercased.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Creates a new `User` document from a `NewUser` DTO, normalizing the
    /// email and applying the default role.
    pub fn from_new_user(new_user: NewUser) -> ValidationResult<Self> {
        let name = new_user.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        let email = Self::normalize_email(&new_user.email);
        if email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        // Shape check only; delivery problems are the mail server's concern.
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(ValidationError::InvalidEmail(new_user.email));
        }

        let role = match new_user.role {
            Some(role) if !role.trim().is_empty() => role.trim().to_string(),
            _ => default_role(),
        };

        Ok(User {
            id: None,
            name,
            email,
            phone: new_user.phone,
            role,
            created_at: DateTime::now(),
        })
    }
}
