//! Database seeding utilities.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::collections::Collection;
use super::store::FixtureStore;
use crate::generators::{
    GeneratedArticle, GeneratedComment, GeneratedFavorite, GeneratedReadHistory, GeneratedUser,
    GeneratedWebChapter, GeneratedWebNovel, GeneratedWenkuNovel, UserFavorites,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inserts generated fixtures into a [`FixtureStore`].
pub struct Seeder<'a, S: FixtureStore> {
    store: &'a S,
}

impl<'a, S: FixtureStore> Seeder<'a, S> {
    /// Creates a new seeder writing to `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Seeds users. Their favorite lists are filled in later by
    /// [`Seeder::update_user_favorites`].
    pub async fn seed_users(&self, users: &[GeneratedUser]) -> Result<usize, SeedError> {
        self.insert(Collection::User, users, "users").await
    }

    /// Seeds web novel metadata.
    pub async fn seed_web_novels(&self, novels: &[GeneratedWebNovel]) -> Result<usize, SeedError> {
        self.insert(Collection::WebNovel, novels, "web novels").await
    }

    /// Seeds web chapters.
    pub async fn seed_web_chapters(
        &self,
        chapters: &[GeneratedWebChapter],
    ) -> Result<usize, SeedError> {
        self.insert(Collection::WebChapter, chapters, "web chapters")
            .await
    }

    /// Seeds wenku novel metadata.
    pub async fn seed_wenku_novels(
        &self,
        novels: &[GeneratedWenkuNovel],
    ) -> Result<usize, SeedError> {
        self.insert(Collection::WenkuNovel, novels, "wenku novels")
            .await
    }

    /// Seeds articles.
    pub async fn seed_articles(&self, articles: &[GeneratedArticle]) -> Result<usize, SeedError> {
        self.insert(Collection::Article, articles, "articles").await
    }

    /// Seeds comments and replies.
    pub async fn seed_comments(&self, comments: &[GeneratedComment]) -> Result<usize, SeedError> {
        self.insert(Collection::Comment, comments, "comments").await
    }

    /// Seeds web novel favorites.
    pub async fn seed_web_favorites(
        &self,
        favorites: &[GeneratedFavorite],
    ) -> Result<usize, SeedError> {
        self.insert(Collection::WebFavorite, favorites, "web favorites")
            .await
    }

    /// Seeds wenku novel favorites.
    pub async fn seed_wenku_favorites(
        &self,
        favorites: &[GeneratedFavorite],
    ) -> Result<usize, SeedError> {
        self.insert(Collection::WenkuFavorite, favorites, "wenku favorites")
            .await
    }

    /// Seeds read history.
    pub async fn seed_read_history(
        &self,
        history: &[GeneratedReadHistory],
    ) -> Result<usize, SeedError> {
        self.insert(Collection::WebReadHistory, history, "read history entries")
            .await
    }

    /// Writes the denormalized favorite summaries back onto each user document.
    ///
    /// Must run after the favorites themselves have been seeded.
    pub async fn update_user_favorites(
        &self,
        favorites: &[UserFavorites],
    ) -> Result<(), SeedError> {
        info!("Updating favorite lists for {} users...", favorites.len());

        for user_favorites in favorites {
            self.store.set_user_favorites(user_favorites).await?;
        }

        info!("Updated favorite lists for {} users", favorites.len());
        Ok(())
    }

    /// Clears every known collection.
    ///
    /// **WARNING**: This deletes all documents in all ten collections and cannot be undone.
    pub async fn clear_all(&self) -> Result<u64, SeedError> {
        info!("Clearing existing collections...");

        let mut total = 0;
        for collection in Collection::ALL {
            let deleted = self.store.clear(collection).await?;
            info!("  Cleared {} ({} documents)", collection, deleted);
            total += deleted;
        }

        info!("All collections cleared");
        Ok(total)
    }

    /// One bulk insert per entity type; empty lists are skipped.
    async fn insert<T>(
        &self,
        collection: Collection,
        docs: &[T],
        label: &str,
    ) -> Result<usize, SeedError>
    where
        T: Serialize + Send + Sync,
    {
        if docs.is_empty() {
            debug!("No {} to seed, skipping {}", label, collection);
            return Ok(0);
        }

        info!("Seeding {} {}...", docs.len(), label);
        let inserted = self.store.insert_many(collection, docs).await?;
        info!("Seeded {} {}", inserted, label);
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::generators::UserGenerator;

    #[tokio::test]
    async fn test_empty_list_is_skipped() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(&store);

        assert_eq!(seeder.seed_web_favorites(&[]).await.unwrap(), 0);
        assert_eq!(store.count(Collection::WebFavorite).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_all_twice_leaves_everything_empty() {
        let store = MemoryStore::new();
        let seeder = Seeder::new(&store);
        let mut rng = rand::thread_rng();
        let users = UserGenerator::new().generate_batch(3, &mut rng);
        seeder.seed_users(&users).await.unwrap();

        assert_eq!(seeder.clear_all().await.unwrap(), 3);
        assert_eq!(seeder.clear_all().await.unwrap(), 0);
        for collection in Collection::ALL {
            assert_eq!(store.count(collection).await.unwrap(), 0);
        }
    }
}
