// storage/src/order_storage.rs

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::errors::StorageResult;
use models::Order;

#[async_trait]
pub trait OrderStorageEngine: Send + Sync + 'static {
    /// Inserts a new order record and returns it with its assigned id.
    async fn insert_order(&self, order: &Order) -> StorageResult<Order>;
    /// Retrieves the orders placed by one user, matched by the stringified
    /// user id.
    async fn list_for_user(&self, user_id: &str) -> StorageResult<Vec<Order>>;
    /// Retrieves every order in the system.
    async fn list_all(&self) -> StorageResult<Vec<Order>>;
}

/// MongoDB-backed implementation of the `OrderStorageEngine` trait over the
/// `orders` collection.
pub struct MongoOrderStorage {
    collection: Collection<Order>,
}

impl MongoOrderStorage {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("orders"),
        }
    }
}

#[async_trait]
impl OrderStorageEngine for MongoOrderStorage {
    async fn insert_order(&self, order: &Order) -> StorageResult<Order> {
        let result = self.collection.insert_one(order).await?;
        let mut stored = order.clone();
        stored.id = result.inserted_id.as_object_id();
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: &str) -> StorageResult<Vec<Order>> {
        let mut cursor = self
            .collection
            .find(doc! { "user_id": user_id.trim() })
            .await?;
        let mut orders = Vec::new();
        while let Some(order) = cursor.try_next().await? {
            orders.push(order);
        }
        Ok(orders)
    }

    async fn list_all(&self) -> StorageResult<Vec<Order>> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut orders = Vec::new();
        while let Some(order) = cursor.try_next().await? {
            orders.push(order);
        }
        Ok(orders)
    }
}
