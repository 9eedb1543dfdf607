// storage/src/user_storage.rs

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use crate::errors::StorageResult;
use models::User;

#[async_trait]
pub trait UserStorageEngine: Send + Sync + 'static {
    /// Inserts a new user document and returns it with its assigned id.
    async fn insert_user(&self, user: &User) -> StorageResult<User>;
    /// Retrieves a user by their normalized email, if one exists.
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>>;
    /// Retrieves every registered user.
    async fn list_users(&self) -> StorageResult<Vec<User>>;
}

/// MongoDB-backed implementation of the `UserStorageEngine` trait over the
/// `users` collection.
pub struct MongoUserStorage {
    collection: Collection<User>,
}

impl MongoUserStorage {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }
}

#[async_trait]
impl UserStorageEngine for MongoUserStorage {
    async fn insert_user(&self, user: &User) -> StorageResult<User> {
        let result = self.collection.insert_one(user).await?;
        let mut stored = user.clone();
        stored.id = result.inserted_id.as_object_id();
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "email": User::normalize_email(email) })
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> StorageResult<Vec<User>> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut users = Vec::new();
        while let Some(user) = cursor.try_next().await? {
            users.push(user);
        }
        Ok(users)
    }
}
