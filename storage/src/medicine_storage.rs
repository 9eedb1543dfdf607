// storage/src/medicine_storage.rs

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::errors::{StorageError, StorageResult};
use models::Medicine;

#[async_trait]
pub trait MedicineStorageEngine: Send + Sync + 'static {
    /// Inserts a new catalog entry and returns it with its assigned id.
    async fn insert_medicine(&self, medicine: &Medicine) -> StorageResult<Medicine>;
    /// Retrieves a catalog entry by id, if one exists.
    async fn get_medicine(&self, id: &ObjectId) -> StorageResult<Option<Medicine>>;
    /// Retrieves catalog entries, optionally restricted to one category
    /// (case-insensitive equality).
    async fn list_medicines(&self, category: Option<&str>) -> StorageResult<Vec<Medicine>>;
    /// Sets the absolute stock level. Returns `false` when no entry with
    /// that id exists.
    async fn set_stock(&self, id: &ObjectId, stock: i64) -> StorageResult<bool>;
    /// Decrements stock by `quantity` only when at least that much is on
    /// hand, as one conditional update, and returns the post-decrement
    /// document. Fails with `InsufficientStock` (stock untouched) or
    /// `NotFound`.
    async fn reserve_stock(&self, id: &ObjectId, quantity: i64) -> StorageResult<Medicine>;
}

/// MongoDB-backed implementation of the `MedicineStorageEngine` trait over
/// the `medicines` collection.
pub struct MongoMedicineStorage {
    collection: Collection<Medicine>,
}

impl MongoMedicineStorage {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("medicines"),
        }
    }
}

#[async_trait]
impl MedicineStorageEngine for MongoMedicineStorage {
    async fn insert_medicine(&self, medicine: &Medicine) -> StorageResult<Medicine> {
        let result = self.collection.insert_one(medicine).await?;
        let mut stored = medicine.clone();
        stored.id = result.inserted_id.as_object_id();
        Ok(stored)
    }

    async fn get_medicine(&self, id: &ObjectId) -> StorageResult<Option<Medicine>> {
        let medicine = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(medicine)
    }

    async fn list_medicines(&self, category: Option<&str>) -> StorageResult<Vec<Medicine>> {
        let filter = match category {
            Some(category) => doc! {
                "category": {
                    "$regex": format!("^{}$", regex::escape(category.trim())),
                    "$options": "i",
                }
            },
            None => doc! {},
        };
        let mut cursor = self.collection.find(filter).await?;
        let mut medicines = Vec::new();
        while let Some(medicine) = cursor.try_next().await? {
            medicines.push(medicine);
        }
        Ok(medicines)
    }

    async fn set_stock(&self, id: &ObjectId, stock: i64) -> StorageResult<bool> {
        let result = self
            .collection
            .update_one(doc! { "_id": *id }, doc! { "$set": { "stock": stock } })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn reserve_stock(&self, id: &ObjectId, quantity: i64) -> StorageResult<Medicine> {
        // The guard and the decrement are one atomic update; either both
        // apply or neither does.
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": *id, "stock": { "$gte": quantity } },
                doc! { "$inc": { "stock": -quantity } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        match updated {
            Some(medicine) => Ok(medicine),
            // Nothing matched: either the medicine is gone or the guard
            // rejected the decrement. A second lookup tells the two apart.
            None => match self.collection.find_one(doc! { "_id": *id }).await? {
                Some(medicine) => Err(StorageError::InsufficientStock {
                    requested: quantity,
                    available: medicine.stock,
                }),
                None => Err(StorageError::NotFound(format!("medicine {}", id.to_hex()))),
            },
        }
    }
}
