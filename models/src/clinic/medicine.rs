// models/src/clinic/medicine.rs

use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMedicine {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// A catalog entry in the `medicines` collection. Stock is the single
/// mutable counter in the system; it is only ever changed by an absolute
/// restock or by the guarded decrement of the order flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime,
}

impl Medicine {
    /// Creates a `Medicine` document from a `NewMedicine` DTO. Stock
    /// defaults to zero when not supplied.
    pub fn from_new_medicine(new_medicine: NewMedicine) -> ValidationResult<Self> {
        let name = new_medicine.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        let category = new_medicine.category.trim().to_string();
        if category.is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        if !new_medicine.price.is_finite() || new_medicine.price < 0.0 {
            return Err(ValidationError::InvalidPrice(new_medicine.price));
        }
        let stock = new_medicine.stock.unwrap_or(0);
        if stock < 0 {
            return Err(ValidationError::InvalidStock(stock));
        }

        Ok(Medicine {
            id: None,
            name,
            category,
            price: new_medicine.price,
            stock,
            description: new_medicine.description,
            image: new_medicine.image,
            created_at: DateTime::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Medicine, NewMedicine};
    use crate::errors::ValidationError;

    fn catalog_entry(price: f64, stock: Option<i64>) -> NewMedicine {
        NewMedicine {
            name: "Paracetamol 500mg".to_string(),
            category: "painkiller".to_string(),
            price,
            stock,
            description: None,
            image: None,
        }
    }

    #[test]
    fn should_default_stock_to_zero() {
        let medicine = Medicine::from_new_medicine(catalog_entry(3.50, None)).unwrap();
        assert_eq!(medicine.stock, 0);
    }

    #[test]
    fn should_reject_negative_price() {
        let err = Medicine::from_new_medicine(catalog_entry(-1.0, None)).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPrice(-1.0));
    }

    #[test]
    fn should_reject_non_finite_price() {
        assert!(Medicine::from_new_medicine(catalog_entry(f64::NAN, None)).is_err());
    }

    #[test]
    fn should_reject_negative_stock() {
        let err = Medicine::from_new_medicine(catalog_entry(3.50, Some(-5))).unwrap_err();
        assert_eq!(err, ValidationError::InvalidStock(-5));
    }
}
