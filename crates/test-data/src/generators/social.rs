//! Comment generation: top-level comments on articles plus one level of replies.

use std::collections::HashMap;

use mongodb::bson::DateTime;
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::article::GeneratedArticle;
use super::random::{chance, days_before, pick};
use super::text::{self, Language};
use super::user::GeneratedUser;

/// Generated comment document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedComment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Thread the comment lives in, e.g. `article/<id>`.
    pub site: String,
    pub content: String,
    pub hidden: bool,
    pub num_replies: i32,
    pub parent: Option<ObjectId>,
    pub user: ObjectId,
    pub create_at: DateTime,
}

impl GeneratedComment {
    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }
}

/// Configuration for comment generation.
#[derive(Debug, Clone)]
pub struct SocialGenConfig {
    /// One reply is generated for every `reply_divisor` top-level comments.
    pub reply_divisor: usize,
    pub hidden_chance: u32,
    pub max_comment_chars: usize,
    pub max_reply_chars: usize,
}

impl Default for SocialGenConfig {
    fn default() -> Self {
        Self {
            reply_divisor: 3,
            hidden_chance: 5,
            max_comment_chars: 500,
            max_reply_chars: 300,
        }
    }
}

/// Generates comment threads.
pub struct SocialGenerator {
    config: SocialGenConfig,
}

impl SocialGenerator {
    /// Creates a new social generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: SocialGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: SocialGenConfig) -> Self {
        Self { config }
    }

    /// Generates `count` top-level comments on random articles, followed by
    /// `count / reply_divisor` replies.
    ///
    /// Replies only ever point at top-level comments, so threads are at most
    /// two levels deep. Each top-level comment's `numReplies` matches the
    /// replies generated for it.
    pub fn generate_comments(
        &self,
        users: &[GeneratedUser],
        articles: &[GeneratedArticle],
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedComment> {
        if users.is_empty() || articles.is_empty() {
            return Vec::new();
        }

        let mut comments: Vec<GeneratedComment> = (0..count)
            .map(|_| {
                let article = pick(rng, articles);
                let user = pick(rng, users);
                GeneratedComment {
                    id: ObjectId::new(),
                    site: format!("article/{}", article.id.to_hex()),
                    content: text::text(Language::Chinese, self.config.max_comment_chars, rng),
                    hidden: chance(rng, self.config.hidden_chance),
                    num_replies: 0,
                    parent: None,
                    user: user.id,
                    create_at: days_before(now, 0..=100, rng),
                }
            })
            .collect();

        let reply_count = if comments.is_empty() {
            0
        } else {
            count / self.config.reply_divisor.max(1)
        };

        let mut replies_per_parent: HashMap<ObjectId, i32> = HashMap::new();
        let mut replies = Vec::with_capacity(reply_count);

        for _ in 0..reply_count {
            let parent = pick(rng, &comments);
            let user = pick(rng, users);
            *replies_per_parent.entry(parent.id).or_default() += 1;

            replies.push(GeneratedComment {
                id: ObjectId::new(),
                site: parent.site.clone(),
                content: text::text(Language::Chinese, self.config.max_reply_chars, rng),
                hidden: chance(rng, self.config.hidden_chance),
                num_replies: 0,
                parent: Some(parent.id),
                user: user.id,
                create_at: days_before(now, 0..=50, rng),
            });
        }

        for comment in &mut comments {
            comment.num_replies = replies_per_parent.get(&comment.id).copied().unwrap_or(0);
        }

        comments.extend(replies);
        comments
    }
}

impl Default for SocialGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::article::ArticleGenerator;
    use crate::generators::user::UserGenerator;
    use std::collections::HashSet;

    fn fixtures(rng: &mut impl Rng) -> (Vec<GeneratedUser>, Vec<GeneratedArticle>) {
        let users = UserGenerator::new().generate_batch(5, rng);
        let articles =
            ArticleGenerator::new().generate_batch(&users, 4, OffsetDateTime::now_utc(), rng);
        (users, articles)
    }

    #[test]
    fn test_comment_counts() {
        let mut rng = rand::thread_rng();
        let (users, articles) = fixtures(&mut rng);

        let comments = SocialGenerator::new().generate_comments(
            &users,
            &articles,
            50,
            OffsetDateTime::now_utc(),
            &mut rng,
        );

        assert_eq!(comments.len(), 50 + 50 / 3);
        assert_eq!(comments.iter().filter(|c| !c.is_reply()).count(), 50);
    }

    #[test]
    fn test_replies_point_at_top_level_comments() {
        let mut rng = rand::thread_rng();
        let (users, articles) = fixtures(&mut rng);

        let comments = SocialGenerator::new().generate_comments(
            &users,
            &articles,
            30,
            OffsetDateTime::now_utc(),
            &mut rng,
        );

        let top_level: HashMap<ObjectId, &GeneratedComment> = comments
            .iter()
            .filter(|c| !c.is_reply())
            .map(|c| (c.id, c))
            .collect();

        for reply in comments.iter().filter(|c| c.is_reply()) {
            let parent = top_level
                .get(&reply.parent.unwrap())
                .expect("reply parent must be a top-level comment");
            assert_eq!(reply.site, parent.site);
            assert_eq!(reply.num_replies, 0);
        }
    }

    #[test]
    fn test_reply_counters_match_replies() {
        let mut rng = rand::thread_rng();
        let (users, articles) = fixtures(&mut rng);

        let comments = SocialGenerator::new().generate_comments(
            &users,
            &articles,
            30,
            OffsetDateTime::now_utc(),
            &mut rng,
        );

        for comment in comments.iter().filter(|c| !c.is_reply()) {
            let replies = comments
                .iter()
                .filter(|r| r.parent == Some(comment.id))
                .count();
            assert_eq!(comment.num_replies as usize, replies);
        }
    }

    #[test]
    fn test_sites_reference_articles() {
        let mut rng = rand::thread_rng();
        let (users, articles) = fixtures(&mut rng);
        let sites: HashSet<String> = articles
            .iter()
            .map(|a| format!("article/{}", a.id.to_hex()))
            .collect();

        let comments = SocialGenerator::new().generate_comments(
            &users,
            &articles,
            20,
            OffsetDateTime::now_utc(),
            &mut rng,
        );

        for c in &comments {
            assert!(sites.contains(&c.site));
            assert!(!c.content.is_empty());
        }
    }

    #[test]
    fn test_no_articles_no_comments() {
        let mut rng = rand::thread_rng();
        let users = UserGenerator::new().generate_batch(3, &mut rng);
        let comments = SocialGenerator::new().generate_comments(
            &users,
            &[],
            10,
            OffsetDateTime::now_utc(),
            &mut rng,
        );
        assert!(comments.is_empty());
    }
}
