//! Fluent builder for constructing seeding scenarios.

use std::fmt;
use std::time::Instant;

use mongodb::bson::oid::ObjectId;
use rand::Rng;
use time::OffsetDateTime;
use tracing::info;

use crate::config::SeedConfig;
use crate::db::{Collection, FixtureStore, SeedError, Seeder};
use crate::generators::{
    article::{ArticleGenConfig, ArticleGenerator, GeneratedArticle},
    chapter::{ChapterGenConfig, ChapterGenerator, GeneratedWebChapter},
    favorite::{
        FavoredIndex, FavoriteGenerator, GeneratedFavorite, UserFavorites, favored_summaries,
    },
    read_history::{GeneratedReadHistory, ReadHistoryGenerator},
    social::{GeneratedComment, SocialGenConfig, SocialGenerator},
    user::{GeneratedUser, UserGenConfig, UserGenerator},
    web_novel::{GeneratedWebNovel, WebNovelGenConfig, WebNovelGenerator},
    wenku::{GeneratedWenkuNovel, WenkuGenConfig, WenkuGenerator},
};

/// Result of building and seeding a scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    pub users: Vec<GeneratedUser>,
    pub web_novels: Vec<GeneratedWebNovel>,
    pub web_chapters: Vec<GeneratedWebChapter>,
    pub wenku_novels: Vec<GeneratedWenkuNovel>,
    pub articles: Vec<GeneratedArticle>,
    pub comments: Vec<GeneratedComment>,
    pub web_favorites: Vec<GeneratedFavorite>,
    pub wenku_favorites: Vec<GeneratedFavorite>,
    pub read_history: Vec<GeneratedReadHistory>,
    /// Per-user favorite summaries computed from the favorite lists above.
    pub user_favorites: Vec<UserFavorites>,
    /// Metrics from scenario generation (populated if metrics tracking enabled).
    pub metrics: Option<ScenarioMetrics>,
}

impl ScenarioResult {
    /// Per-entity document counts.
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            users: self.users.len(),
            web_novels: self.web_novels.len(),
            web_chapters: self.web_chapters.len(),
            wenku_novels: self.wenku_novels.len(),
            articles: self.articles.len(),
            comments: self.comments.len(),
            web_favorites: self.web_favorites.len(),
            wenku_favorites: self.wenku_favorites.len(),
            read_history: self.read_history.len(),
        }
    }

    /// Copies the computed favorite summaries onto the in-memory users, so
    /// they match what the cross-reference pass wrote to the store.
    fn apply_user_favorites(&mut self) {
        for favorites in &self.user_favorites {
            if let Some(user) = self.users.iter_mut().find(|u| u.id == favorites.user_id) {
                user.favored_web = favorites.favored_web.clone();
                user.favored_wenku = favorites.favored_wenku.clone();
            }
        }
    }
}

/// Document counts per entity type, printed at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScenarioSummary {
    pub users: usize,
    pub web_novels: usize,
    pub web_chapters: usize,
    pub wenku_novels: usize,
    pub articles: usize,
    pub comments: usize,
    pub web_favorites: usize,
    pub wenku_favorites: usize,
    pub read_history: usize,
}

impl ScenarioSummary {
    /// `(label, collection, count)` for every seeded entity type, in seeding order.
    pub fn entries(&self) -> [(&'static str, Collection, usize); 9] {
        [
            ("Users", Collection::User, self.users),
            ("Web novels", Collection::WebNovel, self.web_novels),
            ("Web chapters", Collection::WebChapter, self.web_chapters),
            ("Wenku novels", Collection::WenkuNovel, self.wenku_novels),
            ("Articles", Collection::Article, self.articles),
            ("Comments", Collection::Comment, self.comments),
            ("Web favorites", Collection::WebFavorite, self.web_favorites),
            ("Wenku favorites", Collection::WenkuFavorite, self.wenku_favorites),
            ("Read history", Collection::WebReadHistory, self.read_history),
        ]
    }

    /// Total number of documents across all entity types.
    pub fn total(&self) -> usize {
        self.entries().iter().map(|(_, _, count)| count).sum()
    }
}

impl fmt::Display for ScenarioSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data summary:")?;
        for (label, collection, count) in self.entries() {
            writeln!(f, "  - {label} ({collection}): {count}")?;
        }
        Ok(())
    }
}

/// Performance metrics from scenario generation.
#[derive(Debug, Clone)]
pub struct ScenarioMetrics {
    /// Time spent generating data (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent seeding the store (milliseconds, 0 if build_data used).
    pub seeding_time_ms: u64,
    /// Number of documents generated across all entity types.
    pub document_count: usize,
}

/// Builder for creating complete seeding scenarios.
///
/// # Example
///
/// ```rust,ignore
/// let result = ScenarioBuilder::new()
///     .with_users(10)
///     .with_web_novels(20)
///     .with_web_favorites(30)
///     .with_clear_existing(true)
///     .build(&store, &mut rng)
///     .await?;
/// ```
pub struct ScenarioBuilder {
    counts: SeedConfig,

    user_config: UserGenConfig,
    web_novel_config: WebNovelGenConfig,
    chapter_config: ChapterGenConfig,
    wenku_config: WenkuGenConfig,
    article_config: ArticleGenConfig,
    social_config: SocialGenConfig,

    clear_existing: bool,
    track_metrics: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a new scenario builder with default counts.
    pub fn new() -> Self {
        Self::from_config(SeedConfig::default())
    }

    /// Creates a builder from explicit counts.
    pub fn from_config(counts: SeedConfig) -> Self {
        Self {
            counts,
            user_config: UserGenConfig::default(),
            web_novel_config: WebNovelGenConfig::default(),
            chapter_config: ChapterGenConfig::default(),
            wenku_config: WenkuGenConfig::default(),
            article_config: ArticleGenConfig::default(),
            social_config: SocialGenConfig::default(),
            clear_existing: false,
            track_metrics: false,
        }
    }

    /// Sets the number of users to generate.
    pub fn with_users(mut self, count: usize) -> Self {
        self.counts.user_count = count;
        self
    }

    /// Sets the number of web novels to generate.
    pub fn with_web_novels(mut self, count: usize) -> Self {
        self.counts.web_novel_count = count;
        self
    }

    /// Sets how many toc entries of each novel get a chapter document.
    pub fn with_chapters_per_novel(mut self, count: usize) -> Self {
        self.counts.chapters_per_novel = count;
        self
    }

    /// Sets how many novels (from the front) get chapter documents.
    pub fn with_chapter_novel_limit(mut self, limit: usize) -> Self {
        self.counts.chapter_novel_limit = limit;
        self
    }

    /// Sets the number of wenku novels to generate.
    pub fn with_wenku_novels(mut self, count: usize) -> Self {
        self.counts.wenku_novel_count = count;
        self
    }

    /// Sets the number of articles to generate.
    pub fn with_articles(mut self, count: usize) -> Self {
        self.counts.article_count = count;
        self
    }

    /// Sets the number of top-level comments to generate.
    pub fn with_comments(mut self, count: usize) -> Self {
        self.counts.comment_count = count;
        self
    }

    /// Sets the requested number of web favorites.
    pub fn with_web_favorites(mut self, count: usize) -> Self {
        self.counts.web_favorite_count = count;
        self
    }

    /// Sets the requested number of wenku favorites.
    pub fn with_wenku_favorites(mut self, count: usize) -> Self {
        self.counts.wenku_favorite_count = count;
        self
    }

    /// Sets the number of read-history draws.
    pub fn with_read_history(mut self, count: usize) -> Self {
        self.counts.read_history_count = count;
        self
    }

    /// Sets the user generation configuration.
    pub fn with_user_config(mut self, config: UserGenConfig) -> Self {
        self.user_config = config;
        self
    }

    /// Sets the web novel generation configuration.
    pub fn with_web_novel_config(mut self, config: WebNovelGenConfig) -> Self {
        self.web_novel_config = config;
        self
    }

    /// Sets the chapter generation configuration.
    pub fn with_chapter_config(mut self, config: ChapterGenConfig) -> Self {
        self.chapter_config = config;
        self
    }

    /// Sets the wenku generation configuration.
    pub fn with_wenku_config(mut self, config: WenkuGenConfig) -> Self {
        self.wenku_config = config;
        self
    }

    /// Sets the article generation configuration.
    pub fn with_article_config(mut self, config: ArticleGenConfig) -> Self {
        self.article_config = config;
        self
    }

    /// Sets the comment generation configuration.
    pub fn with_social_config(mut self, config: SocialGenConfig) -> Self {
        self.social_config = config;
        self
    }

    /// Deletes all documents in every known collection before seeding.
    pub fn with_clear_existing(mut self, enabled: bool) -> Self {
        self.clear_existing = enabled;
        self
    }

    /// Enables metrics tracking for performance analysis.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Builds the scenario (generates data but doesn't seed the store).
    pub fn build_data(&self, rng: &mut impl Rng) -> ScenarioResult {
        let start_time = self.track_metrics.then(Instant::now);
        let now = OffsetDateTime::now_utc();
        let counts = &self.counts;

        let users = UserGenerator::with_config(self.user_config.clone())
            .generate_batch(counts.user_count, rng);

        let web_novels = WebNovelGenerator::with_config(self.web_novel_config.clone())
            .generate_batch(counts.web_novel_count, now, rng);

        let web_chapters = ChapterGenerator::with_config(self.chapter_config.clone())
            .generate_for_novels(
                &web_novels,
                counts.chapter_novel_limit,
                counts.chapters_per_novel,
                rng,
            );

        let web_ids: Vec<ObjectId> = web_novels.iter().map(|n| n.id).collect();
        let wenku_novels = WenkuGenerator::with_config(self.wenku_config.clone())
            .generate_batch(counts.wenku_novel_count, &web_ids, now, rng);

        let articles = ArticleGenerator::with_config(self.article_config.clone())
            .generate_batch(&users, counts.article_count, now, rng);

        let comments = SocialGenerator::with_config(self.social_config.clone())
            .generate_comments(&users, &articles, counts.comment_count, now, rng);

        let user_ids: Vec<ObjectId> = users.iter().map(|u| u.id).collect();
        let wenku_ids: Vec<ObjectId> = wenku_novels.iter().map(|n| n.id).collect();
        let favorite_gen =
            FavoriteGenerator::new().with_retry_multiplier(counts.favorite_retry_multiplier);
        let web_favorites =
            favorite_gen.generate(&user_ids, &web_ids, counts.web_favorite_count, now, rng);
        let wenku_favorites =
            favorite_gen.generate(&user_ids, &wenku_ids, counts.wenku_favorite_count, now, rng);

        let read_history = ReadHistoryGenerator::new().generate(
            &users,
            &web_novels,
            counts.read_history_count,
            now,
            rng,
        );

        // Summaries are always recomputed from the full favorite lists.
        let user_favorites = favored_summaries(
            &users,
            &FavoredIndex::for_web(&web_novels),
            &web_favorites,
            &FavoredIndex::for_wenku(&wenku_novels),
            &wenku_favorites,
        );

        let mut result = ScenarioResult {
            users,
            web_novels,
            web_chapters,
            wenku_novels,
            articles,
            comments,
            web_favorites,
            wenku_favorites,
            read_history,
            user_favorites,
            metrics: None,
        };

        result.metrics = start_time.map(|start| ScenarioMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            seeding_time_ms: 0, // Set by build() if seeding occurs
            document_count: result.summary().total(),
        });

        result
    }

    /// Builds and seeds the scenario into `store`.
    ///
    /// Users are inserted with empty favorite lists; the summaries are written
    /// back with one update per user once all favorites are stored.
    pub async fn build<S: FixtureStore>(
        self,
        store: &S,
        rng: &mut impl Rng,
    ) -> Result<ScenarioResult, SeedError> {
        let mut result = self.build_data(rng);
        let seed_start = self.track_metrics.then(Instant::now);

        let seeder = Seeder::new(store);

        if self.clear_existing {
            seeder.clear_all().await?;
        }

        // Seed in dependency order
        seeder.seed_users(&result.users).await?;
        seeder.seed_web_novels(&result.web_novels).await?;
        seeder.seed_web_chapters(&result.web_chapters).await?;
        seeder.seed_wenku_novels(&result.wenku_novels).await?;
        seeder.seed_articles(&result.articles).await?;
        seeder.seed_comments(&result.comments).await?;
        seeder.seed_web_favorites(&result.web_favorites).await?;
        seeder.seed_wenku_favorites(&result.wenku_favorites).await?;
        seeder.seed_read_history(&result.read_history).await?;

        seeder.update_user_favorites(&result.user_favorites).await?;
        result.apply_user_favorites();

        if let (Some(start), Some(metrics)) = (seed_start, result.metrics.as_mut()) {
            metrics.seeding_time_ms = start.elapsed().as_millis() as u64;
        }

        info!("Seeded {} documents", result.summary().total());
        Ok(result)
    }
}

/// Preset scenarios for common testing needs.
impl ScenarioBuilder {
    /// Minimal scenario for quick checks: a handful of every entity.
    pub fn small_test() -> Self {
        Self::new()
            .with_users(3)
            .with_web_novels(4)
            .with_chapters_per_novel(2)
            .with_wenku_novels(3)
            .with_articles(3)
            .with_comments(6)
            .with_web_favorites(5)
            .with_wenku_favorites(4)
            .with_read_history(8)
    }

    /// Scenario with many favorites per user, for exercising favorite lists.
    ///
    /// - 20 users, 60 web novels, 40 wenku novels
    /// - 300 web and 200 wenku favorites
    pub fn favorites_test() -> Self {
        Self::new()
            .with_users(20)
            .with_web_novels(60)
            .with_wenku_novels(40)
            .with_web_favorites(300)
            .with_wenku_favorites(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_build_data_default_counts() {
        let mut rng = rand::thread_rng();
        let result = ScenarioBuilder::new().build_data(&mut rng);

        assert_eq!(result.users.len(), 10);
        assert_eq!(result.web_novels.len(), 20);
        assert_eq!(result.web_chapters.len(), 50);
        assert_eq!(result.wenku_novels.len(), 15);
        assert_eq!(result.articles.len(), 15);
        assert_eq!(result.comments.len(), 50 + 50 / 3);
        assert!(result.web_favorites.len() <= 30);
        assert!(result.wenku_favorites.len() <= 20);
        assert_eq!(result.read_history.len(), 40);
        assert_eq!(result.user_favorites.len(), 10);
        assert!(result.metrics.is_none());
    }

    #[test]
    fn test_users_start_without_favorites() {
        let mut rng = rand::thread_rng();
        let result = ScenarioBuilder::small_test().build_data(&mut rng);

        assert!(result.users.iter().all(|u| u.favored_web.is_empty()));
        assert!(result.users.iter().all(|u| u.favored_wenku.is_empty()));
    }

    #[test]
    fn test_preset_favorites() {
        let builder = ScenarioBuilder::favorites_test();
        assert_eq!(builder.counts.user_count, 20);
        assert_eq!(builder.counts.web_favorite_count, 300);
    }

    #[test]
    fn test_zero_users_yields_no_dependents() {
        let mut rng = rand::thread_rng();
        let result = ScenarioBuilder::new().with_users(0).build_data(&mut rng);

        assert!(result.users.is_empty());
        assert!(result.articles.is_empty());
        assert!(result.comments.is_empty());
        assert!(result.web_favorites.is_empty());
        assert!(result.read_history.is_empty());
        assert_eq!(result.web_novels.len(), 20);
    }

    #[test]
    fn test_metrics_tracking() {
        let mut rng = StdRng::seed_from_u64(12345);
        let result = ScenarioBuilder::small_test()
            .with_metrics(true)
            .build_data(&mut rng);

        let metrics = result.metrics.as_ref().expect("metrics enabled");
        assert_eq!(metrics.document_count, result.summary().total());
        assert_eq!(metrics.seeding_time_ms, 0);
    }

    #[test]
    fn test_summary_display() {
        let summary = ScenarioSummary {
            users: 10,
            comments: 66,
            ..Default::default()
        };
        let text = summary.to_string();

        assert!(text.contains("  - Users (user): 10"));
        assert!(text.contains("  - Comments (comment-alt): 66"));
        assert_eq!(summary.total(), 76);
    }

    #[tokio::test]
    async fn test_build_applies_favorites_to_users() {
        let store = MemoryStore::new();
        let mut rng = rand::thread_rng();
        let result = ScenarioBuilder::small_test()
            .build(&store, &mut rng)
            .await
            .unwrap();

        for favorites in &result.user_favorites {
            let user = result
                .users
                .iter()
                .find(|u| u.id == favorites.user_id)
                .unwrap();
            assert_eq!(user.favored_web, favorites.favored_web);
            assert_eq!(user.favored_wenku, favorites.favored_wenku);
        }
    }
}
