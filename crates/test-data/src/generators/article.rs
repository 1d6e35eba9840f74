//! Forum article generation.

use mongodb::bson::DateTime;
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::random::{chance, days_before, hours_before, pick};
use super::text::{self, Language};
use super::user::GeneratedUser;

/// Forum board an article is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleCategory {
    Guide,
    General,
    Support,
}

impl ArticleCategory {
    pub const ALL: [ArticleCategory; 3] = [
        ArticleCategory::Guide,
        ArticleCategory::General,
        ArticleCategory::Support,
    ];
}

/// Generated article document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArticle {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    pub locked: bool,
    pub pinned: bool,
    pub hidden: bool,
    pub num_views: i32,
    pub num_comments: i32,
    pub user: ObjectId,
    pub create_at: DateTime,
    pub update_at: DateTime,
    pub change_at: DateTime,
}

/// Configuration for article generation.
#[derive(Debug, Clone)]
pub struct ArticleGenConfig {
    pub locked_chance: u32,
    pub pinned_chance: u32,
    pub hidden_chance: u32,
    /// Maximum content length in characters.
    pub max_content_chars: usize,
}

impl Default for ArticleGenConfig {
    fn default() -> Self {
        Self {
            locked_chance: 10,
            pinned_chance: 10,
            hidden_chance: 5,
            max_content_chars: 2000,
        }
    }
}

/// Generates articles authored by existing users.
pub struct ArticleGenerator {
    config: ArticleGenConfig,
}

impl ArticleGenerator {
    /// Creates a new article generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: ArticleGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: ArticleGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single article by `author`.
    pub fn generate(
        &self,
        author: &GeneratedUser,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> GeneratedArticle {
        let c = &self.config;

        GeneratedArticle {
            id: ObjectId::new(),
            title: text::sentence(Language::Chinese, 8, rng),
            content: text::text(Language::Chinese, c.max_content_chars, rng),
            category: *pick(rng, &ArticleCategory::ALL),
            locked: chance(rng, c.locked_chance),
            pinned: chance(rng, c.pinned_chance),
            hidden: chance(rng, c.hidden_chance),
            num_views: rng.gen_range(0..=5_000),
            num_comments: rng.gen_range(0..=100),
            user: author.id,
            create_at: days_before(now, 1..=365, rng),
            update_at: hours_before(now, 0..=240, rng),
            change_at: hours_before(now, 0..=120, rng),
        }
    }

    /// Generates `count` articles, each by a randomly chosen user.
    ///
    /// Returns nothing when there are no users to attribute articles to.
    pub fn generate_batch(
        &self,
        users: &[GeneratedUser],
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedArticle> {
        if users.is_empty() {
            return Vec::new();
        }

        (0..count)
            .map(|_| {
                let author = pick(rng, users);
                self.generate(author, now, rng)
            })
            .collect()
    }
}

impl Default for ArticleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::user::UserGenerator;

    #[test]
    fn test_articles_belong_to_users() {
        let mut rng = rand::thread_rng();
        let users = UserGenerator::new().generate_batch(4, &mut rng);
        let articles =
            ArticleGenerator::new().generate_batch(&users, 15, OffsetDateTime::now_utc(), &mut rng);

        assert_eq!(articles.len(), 15);
        for article in &articles {
            assert!(users.iter().any(|u| u.id == article.user));
            assert!(article.content.chars().count() <= 2000);
            assert!((0..=5_000).contains(&article.num_views));
        }
    }

    #[test]
    fn test_no_users_no_articles() {
        let mut rng = rand::thread_rng();
        let articles =
            ArticleGenerator::new().generate_batch(&[], 5, OffsetDateTime::now_utc(), &mut rng);
        assert!(articles.is_empty());
    }

    #[test]
    fn test_category_serializes_by_name() {
        let value = serde_json::to_value(ArticleCategory::Support).unwrap();
        assert_eq!(value, "Support");
    }
}
