// models/src/clinic/order.rs

use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

/// The only status an order is ever written with.
pub const ORDER_STATUS_PLACED: &str = "placed";

fn default_order_status() -> String {
    ORDER_STATUS_PLACED.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub user_id: String,
    pub medicine_id: String,
    pub quantity: i64,
}

impl NewOrder {
    /// Shape check for a placement request. Stock availability is decided
    /// by the guarded decrement, not here.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId"));
        }
        if self.medicine_id.trim().is_empty() {
            return Err(ValidationError::MissingField("medicineId"));
        }
        if self.quantity < 1 {
            return Err(ValidationError::InvalidQuantity(self.quantity));
        }
        Ok(())
    }
}

/// A placed order. `price_per_unit` and `total_price` are a snapshot of the
/// medicine price at order time; later catalog edits never touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub medicine_id: String,
    pub quantity: i64,
    pub price_per_unit: f64,
    pub total_price: f64,
    #[serde(default = "default_order_status")]
    pub status: String,
    pub created_at: DateTime,
}

impl Order {
    /// Builds the order record for a reservation that already went through.
    pub fn place(user_id: &str, medicine_id: &str, quantity: i64, price_per_unit: f64) -> Self {
        Order {
            id: None,
            user_id: user_id.trim().to_string(),
            medicine_id: medicine_id.trim().to_string(),
            quantity,
            price_per_unit,
            total_price: price_per_unit * quantity as f64,
            status: default_order_status(),
            created_at: DateTime::now(),
        }
    }
}
