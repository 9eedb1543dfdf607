// storage/src/appointment_storage.rs

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database};

use crate::errors::StorageResult;
use models::{Appointment, AppointmentStatus};

#[async_trait]
pub trait AppointmentStorageEngine: Send + Sync + 'static {
    /// Inserts a new appointment and returns it with its assigned id.
    async fn insert_appointment(&self, appointment: &Appointment) -> StorageResult<Appointment>;
    /// Retrieves the appointments booked by one user, matched by the
    /// stringified user id.
    async fn list_for_user(&self, user_id: &str) -> StorageResult<Vec<Appointment>>;
    /// Retrieves every appointment in the system.
    async fn list_all(&self) -> StorageResult<Vec<Appointment>>;
    /// Moves an appointment to the given status. Returns `false` when no
    /// appointment with that id exists.
    async fn set_appointment_status(
        &self,
        id: &ObjectId,
        status: AppointmentStatus,
    ) -> StorageResult<bool>;
}

/// MongoDB-backed implementation of the `AppointmentStorageEngine` trait
/// over the `appointments` collection.
pub struct MongoAppointmentStorage {
    collection: Collection<Appointment>,
}

impl MongoAppointmentStorage {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("appointments"),
        }
    }
}

#[async_trait]
impl AppointmentStorageEngine for MongoAppointmentStorage {
    async fn insert_appointment(&self, appointment: &Appointment) -> StorageResult<Appointment> {
        let result = self.collection.insert_one(appointment).await?;
        let mut stored = appointment.clone();
        stored.id = result.inserted_id.as_object_id();
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: &str) -> StorageResult<Vec<Appointment>> {
        let mut cursor = self
            .collection
            .find(doc! { "user_id": user_id.trim() })
            .await?;
        let mut appointments = Vec::new();
        while let Some(appointment) = cursor.try_next().await? {
            appointments.push(appointment);
        }
        Ok(appointments)
    }

    async fn list_all(&self) -> StorageResult<Vec<Appointment>> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut appointments = Vec::new();
        while let Some(appointment) = cursor.try_next().await? {
            appointments.push(appointment);
        }
        Ok(appointments)
    }

    async fn set_appointment_status(
        &self,
        id: &ObjectId,
        status: AppointmentStatus,
    ) -> StorageResult<bool> {
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
