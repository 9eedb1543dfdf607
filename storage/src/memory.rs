// storage/src/memory.rs
// In-memory implementations of the collection engines. They back the test
// suite and local development runs where no document store is available.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::appointment_storage::AppointmentStorageEngine;
use crate::doctor_storage::DoctorStorageEngine;
use crate::errors::{StorageError, StorageResult};
use crate::medicine_storage::MedicineStorageEngine;
use crate::order_storage::OrderStorageEngine;
use crate::user_storage::UserStorageEngine;
use models::{Appointment, AppointmentStatus, Doctor, DoctorStatus, Medicine, Order, User};

/// In-memory implementation of the `UserStorageEngine` trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStorage {
    users: Arc<RwLock<Vec<User>>>,
}

#[async_trait]
impl UserStorageEngine for MemoryUserStorage {
    async fn insert_user(&self, user: &User) -> StorageResult<User> {
        let mut users = self.users.write().await;
        let mut stored = user.clone();
        stored.id = Some(stored.id.unwrap_or_else(ObjectId::new));
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let needle = User::normalize_email(email);
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == needle).cloned())
    }

    async fn list_users(&self) -> StorageResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }
}

/// In-memory implementation of the `DoctorStorageEngine` trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryDoctorStorage {
    doctors: Arc<RwLock<Vec<Doctor>>>,
}

#[async_trait]
impl DoctorStorageEngine for MemoryDoctorStorage {
    async fn insert_doctor(&self, doctor: &Doctor) -> StorageResult<Doctor> {
        let mut doctors = self.doctors.write().await;
        let mut stored = doctor.clone();
        stored.id = Some(stored.id.unwrap_or_else(ObjectId::new));
        doctors.push(stored.clone());
        Ok(stored)
    }

    async fn get_doctor(&self, id: &ObjectId) -> StorageResult<Option<Doctor>> {
        let doctors = self.doctors.read().await;
        Ok(doctors.iter().find(|d| d.id == Some(*id)).cloned())
    }

    async fn list_doctors(&self, status: Option<DoctorStatus>) -> StorageResult<Vec<Doctor>> {
        let doctors = self.doctors.read().await;
        Ok(doctors
            .iter()
            .filter(|d| status.map_or(true, |s| d.status == s))
            .cloned()
            .collect())
    }

    async fn set_doctor_status(&self, id: &ObjectId, status: DoctorStatus) -> StorageResult<bool> {
        let mut doctors = self.doctors.write().await;
        match doctors.iter_mut().find(|d| d.id == Some(*id)) {
            Some(doctor) => {
                doctor.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory implementation of the `AppointmentStorageEngine` trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryAppointmentStorage {
    appointments: Arc<RwLock<Vec<Appointment>>>,
}

#[async_trait]
impl AppointmentStorageEngine for MemoryAppointmentStorage {
    async fn insert_appointment(&self, appointment: &Appointment) -> StorageResult<Appointment> {
        let mut appointments = self.appointments.write().await;
        let mut stored = appointment.clone();
        stored.id = Some(stored.id.unwrap_or_else(ObjectId::new));
        appointments.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: &str) -> StorageResult<Vec<Appointment>> {
        let appointments = self.appointments.read().await;
        Ok(appointments
            .iter()
            .filter(|a| a.user_id == user_id.trim())
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> StorageResult<Vec<Appointment>> {
        Ok(self.appointments.read().await.clone())
    }

    async fn set_appointment_status(
        &self,
        id: &ObjectId,
        status: AppointmentStatus,
    ) -> StorageResult<bool> {
        let mut appointments = self.appointments.write().await;
        match appointments.iter_mut().find(|a| a.id == Some(*id)) {
            Some(appointment) => {
                appointment.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory implementation of the `MedicineStorageEngine` trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryMedicineStorage {
    medicines: Arc<RwLock<Vec<Medicine>>>,
}

#[async_trait]
impl MedicineStorageEngine for MemoryMedicineStorage {
    async fn insert_medicine(&self, medicine: &Medicine) -> StorageResult<Medicine> {
        let mut medicines = self.medicines.write().await;
        let mut stored = medicine.clone();
        stored.id = Some(stored.id.unwrap_or_else(ObjectId::new));
        medicines.push(stored.clone());
        Ok(stored)
    }

    async fn get_medicine(&self, id: &ObjectId) -> StorageResult<Option<Medicine>> {
        let medicines = self.medicines.read().await;
        Ok(medicines.iter().find(|m| m.id == Some(*id)).cloned())
    }

    async fn list_medicines(&self, category: Option<&str>) -> StorageResult<Vec<Medicine>> {
        let medicines = self.medicines.read().await;
        Ok(medicines
            .iter()
            .filter(|m| {
                category.map_or(true, |c| m.category.eq_ignore_ascii_case(c.trim()))
            })
            .cloned()
            .collect())
    }

    async fn set_stock(&self, id: &ObjectId, stock: i64) -> StorageResult<bool> {
        let mut medicines = self.medicines.write().await;
        match medicines.iter_mut().find(|m| m.id == Some(*id)) {
            Some(medicine) => {
                medicine.stock = stock;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reserve_stock(&self, id: &ObjectId, quantity: i64) -> StorageResult<Medicine> {
        // Guard and decrement happen under one write lock, mirroring the
        // single conditional update the document store performs.
        let mut medicines = self.medicines.write().await;
        let medicine = medicines
            .iter_mut()
            .find(|m| m.id == Some(*id))
            .ok_or_else(|| StorageError::NotFound(format!("medicine {}", id.to_hex())))?;

        if medicine.stock < quantity {
            return Err(StorageError::InsufficientStock {
                requested: quantity,
                available: medicine.stock,
            });
        }
        medicine.stock -= quantity;
        Ok(medicine.clone())
    }
}

/// In-memory implementation of the `OrderStorageEngine` trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStorage {
    orders: Arc<RwLock<Vec<Order>>>,
}

#[async_trait]
impl OrderStorageEngine for MemoryOrderStorage {
    async fn insert_order(&self, order: &Order) -> StorageResult<Order> {
        let mut orders = self.orders.write().await;
        let mut stored = order.clone();
        stored.id = Some(stored.id.unwrap_or_else(ObjectId::new));
        orders.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: &str) -> StorageResult<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.user_id == user_id.trim())
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> StorageResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{Medicine, NewMedicine};

    fn medicine(stock: i64) -> Medicine {
        Medicine::from_new_medicine(NewMedicine {
            name: "Ibuprofen 200mg".to_string(),
            category: "painkiller".to_string(),
            price: 4.20,
            stock: Some(stock),
            description: None,
            image: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn should_decrement_stock_by_reserved_quantity() {
        let engine = MemoryMedicineStorage::default();
        let stored = engine.insert_medicine(&medicine(10)).await.unwrap();
        let id = stored.id.unwrap();

        let after = engine.reserve_stock(&id, 4).await.unwrap();
        assert_eq!(after.stock, 6);
        assert_eq!(engine.get_medicine(&id).await.unwrap().unwrap().stock, 6);
    }

    #[tokio::test]
    async fn should_leave_stock_unchanged_when_reservation_exceeds_it() {
        let engine = MemoryMedicineStorage::default();
        let stored = engine.insert_medicine(&medicine(3)).await.unwrap();
        let id = stored.id.unwrap();

        let err = engine.reserve_stock(&id, 5).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::InsufficientStock {
                requested: 5,
                available: 3
            }
        ));
        assert_eq!(engine.get_medicine(&id).await.unwrap().unwrap().stock, 3);
    }

    #[tokio::test]
    async fn should_report_missing_medicine_on_reservation() {
        let engine = MemoryMedicineStorage::default();
        let err = engine.reserve_stock(&ObjectId::new(), 1).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn should_filter_doctor_listing_by_status() {
        let engine = MemoryDoctorStorage::default();
        let pending = engine
            .insert_doctor(
                &models::Doctor::from_new_doctor(models::NewDoctor {
                    name: "Dr. Pending".to_string(),
                    specialization: None,
                    email: None,
                    phone: None,
                })
                .unwrap(),
            )
            .await
            .unwrap();
        engine
            .set_doctor_status(&pending.id.unwrap(), DoctorStatus::Approved)
            .await
            .unwrap();

        let approved = engine
            .list_doctors(Some(DoctorStatus::Approved))
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        let still_pending = engine
            .list_doctors(Some(DoctorStatus::Pending))
            .await
            .unwrap();
        assert!(still_pending.is_empty());
    }

    #[tokio::test]
    async fn should_report_unknown_doctor_on_status_change() {
        let engine = MemoryDoctorStorage::default();
        let matched = engine
            .set_doctor_status(&ObjectId::new(), DoctorStatus::Approved)
            .await
            .unwrap();
        assert!(!matched);
    }
}
