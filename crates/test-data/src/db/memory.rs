//! In-memory document store for tests and dry runs.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mongodb::bson::{Document, to_document};
use serde::Serialize;

use super::collections::Collection;
use super::seeder::SeedError;
use super::store::{FixtureStore, favorites_update};
use crate::generators::UserFavorites;

/// Keeps serialized documents per collection, exactly as they would be sent to MongoDB.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the documents stored in `collection`.
    pub fn documents(&self, collection: Collection) -> Vec<Document> {
        self.lock().get(&collection).cloned().unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Collection, Vec<Document>>> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FixtureStore for MemoryStore {
    async fn clear(&self, collection: Collection) -> Result<u64, SeedError> {
        let removed = self
            .lock()
            .get_mut(&collection)
            .map(|docs| docs.drain(..).count())
            .unwrap_or(0);
        Ok(removed as u64)
    }

    async fn insert_many<T>(&self, collection: Collection, docs: &[T]) -> Result<usize, SeedError>
    where
        T: Serialize + Send + Sync,
    {
        let serialized = docs
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;
        let inserted = serialized.len();

        self.lock().entry(collection).or_default().extend(serialized);
        Ok(inserted)
    }

    async fn set_user_favorites(&self, favorites: &UserFavorites) -> Result<(), SeedError> {
        let update = favorites_update(favorites)?;
        let mut collections = self.lock();

        let user = collections
            .get_mut(&Collection::User)
            .and_then(|users| {
                users
                    .iter_mut()
                    .find(|d| d.get_object_id("_id").ok() == Some(favorites.user_id))
            });

        if let (Some(user), Ok(fields)) = (user, update.get_document("$set")) {
            for (key, value) in fields {
                user.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<u64, SeedError> {
        Ok(self.lock().get(&collection).map_or(0, Vec::len) as u64)
    }
}
