// storage/src/doctor_storage.rs

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database};

use crate::errors::StorageResult;
use models::{Doctor, DoctorStatus};

#[async_trait]
pub trait DoctorStorageEngine: Send + Sync + 'static {
    /// Inserts a new doctor document and returns it with its assigned id.
    async fn insert_doctor(&self, doctor: &Doctor) -> StorageResult<Doctor>;
    /// Retrieves a doctor by id, if one exists.
    async fn get_doctor(&self, id: &ObjectId) -> StorageResult<Option<Doctor>>;
    /// Retrieves doctors, optionally restricted to one approval status.
    async fn list_doctors(&self, status: Option<DoctorStatus>) -> StorageResult<Vec<Doctor>>;
    /// Moves a doctor to the given approval status. Returns `false` when no
    /// doctor with that id exists.
    async fn set_doctor_status(&self, id: &ObjectId, status: DoctorStatus) -> StorageResult<bool>;
}

/// MongoDB-backed implementation of the `DoctorStorageEngine` trait over the
/// `doctors` collection.
pub struct MongoDoctorStorage {
    collection: Collection<Doctor>,
}

impl MongoDoctorStorage {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("doctors"),
        }
    }
}

#[async_trait]
impl DoctorStorageEngine for MongoDoctorStorage {
    async fn insert_doctor(&self, doctor: &Doctor) -> StorageResult<Doctor> {
        let result = self.collection.insert_one(doctor).await?;
        let mut stored = doctor.clone();
        stored.id = result.inserted_id.as_object_id();
        Ok(stored)
    }

    async fn get_doctor(&self, id: &ObjectId) -> StorageResult<Option<Doctor>> {
        let doctor = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(doctor)
    }

    async fn list_doctors(&self, status: Option<DoctorStatus>) -> StorageResult<Vec<Doctor>> {
        let filter = match status {
            Some(status) => doc! { "status": status.as_str() },
            None => doc! {},
        };
        let mut cursor = self.collection.find(filter).await?;
        let mut doctors = Vec::new();
        while let Some(doctor) = cursor.try_next().await? {
            doctors.push(doctor);
        }
        Ok(doctors)
    }

    async fn set_doctor_status(&self, id: &ObjectId, status: DoctorStatus) -> StorageResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "status": status.as_str() } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }
}
