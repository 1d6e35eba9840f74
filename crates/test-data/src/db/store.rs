//! Storage backends the seeder writes to.

use async_trait::async_trait;
use mongodb::bson::{Document, doc, to_bson};
use mongodb::{Client, Database};
use serde::Serialize;
use tracing::info;

use super::collections::Collection;
use super::seeder::SeedError;
use crate::config::MongoConfig;
use crate::generators::UserFavorites;

/// Document store operations needed to seed fixtures.
#[async_trait]
pub trait FixtureStore: Send + Sync {
    /// Deletes every document in `collection`. Returns the number deleted.
    async fn clear(&self, collection: Collection) -> Result<u64, SeedError>;

    /// Inserts all `docs` with one bulk call. Returns the number inserted.
    async fn insert_many<T>(&self, collection: Collection, docs: &[T]) -> Result<usize, SeedError>
    where
        T: Serialize + Send + Sync;

    /// Overwrites both favorite summary lists on one user document.
    async fn set_user_favorites(&self, favorites: &UserFavorites) -> Result<(), SeedError>;

    /// Number of documents currently in `collection`.
    async fn count(&self, collection: Collection) -> Result<u64, SeedError>;
}

/// The `$set` update applied to a user document by the cross-reference pass.
pub fn favorites_update(favorites: &UserFavorites) -> Result<Document, SeedError> {
    Ok(doc! {
        "$set": {
            "favoredWeb": to_bson(&favorites.favored_web)?,
            "favoredWenku": to_bson(&favorites.favored_wenku)?,
        }
    })
}

/// MongoDB-backed store.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connects to the configured server and pings it.
    ///
    /// Fails immediately if the server cannot be reached; there is no retry.
    pub async fn connect(config: &MongoConfig) -> Result<Self, SeedError> {
        let client = Client::with_uri_str(config.uri()).await?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Connected to MongoDB at {}:{}", config.host, config.port);

        let db = client.database(&config.database);
        Ok(Self { client, db })
    }

    /// Returns the target database for advanced usage.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the client, waiting for in-flight operations to finish.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl FixtureStore for MongoStore {
    async fn clear(&self, collection: Collection) -> Result<u64, SeedError> {
        let result = self
            .db
            .collection::<Document>(collection.name())
            .delete_many(doc! {})
            .await?;
        Ok(result.deleted_count)
    }

    async fn insert_many<T>(&self, collection: Collection, docs: &[T]) -> Result<usize, SeedError>
    where
        T: Serialize + Send + Sync,
    {
        let result = self
            .db
            .collection::<T>(collection.name())
            .insert_many(docs)
            .await?;
        Ok(result.inserted_ids.len())
    }

    async fn set_user_favorites(&self, favorites: &UserFavorites) -> Result<(), SeedError> {
        self.db
            .collection::<Document>(Collection::User.name())
            .update_one(
                doc! { "_id": favorites.user_id },
                favorites_update(favorites)?,
            )
            .await?;
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<u64, SeedError> {
        let count = self
            .db
            .collection::<Document>(collection.name())
            .count_documents(doc! {})
            .await?;
        Ok(count)
    }
}
