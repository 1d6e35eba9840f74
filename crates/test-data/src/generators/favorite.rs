//! Favorite generation and the denormalized per-user favorite summaries.

use std::collections::{HashMap, HashSet};

use mongodb::bson::DateTime;
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use super::random::{days_before, hours_before, pick, uuid_string};
use super::user::{FavoredNovel, GeneratedUser};
use super::web_novel::GeneratedWebNovel;
use super::wenku::GeneratedWenkuNovel;

/// Title used in a summary when the favorited novel is not known.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Generated favorite document (shared by web and wenku favorites).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFavorite {
    pub user_id: ObjectId,
    pub novel_id: ObjectId,
    /// Opaque id of the favorite list the novel was filed under.
    pub favored_id: String,
    pub create_at: DateTime,
    pub update_at: DateTime,
}

/// Generates favorites with unique `(user, novel)` pairs.
pub struct FavoriteGenerator {
    retry_multiplier: usize,
}

impl FavoriteGenerator {
    /// Creates a generator that gives up after three draws per requested favorite.
    pub fn new() -> Self {
        Self {
            retry_multiplier: 3,
        }
    }

    /// Sets the draw budget as a multiple of the requested count.
    pub fn with_retry_multiplier(mut self, multiplier: usize) -> Self {
        self.retry_multiplier = multiplier;
        self
    }

    /// Draws random `(user, novel)` pairs until `count` unique ones are found
    /// or the draw budget (`count * retry_multiplier`) runs out.
    ///
    /// Under-delivery is expected when the pair space is small or crowded and
    /// is not an error.
    pub fn generate(
        &self,
        user_ids: &[ObjectId],
        novel_ids: &[ObjectId],
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedFavorite> {
        if user_ids.is_empty() || novel_ids.is_empty() {
            return Vec::new();
        }

        let max_attempts = count * self.retry_multiplier;
        let mut favorites = Vec::with_capacity(count);
        let mut used_pairs = HashSet::new();
        let mut attempts = 0;

        while favorites.len() < count && attempts < max_attempts {
            attempts += 1;
            let user_id = *pick(rng, user_ids);
            let novel_id = *pick(rng, novel_ids);

            if !used_pairs.insert((user_id, novel_id)) {
                continue;
            }

            favorites.push(GeneratedFavorite {
                user_id,
                novel_id,
                favored_id: uuid_string(rng),
                create_at: days_before(now, 1..=365, rng),
                update_at: hours_before(now, 0..=240, rng),
            });
        }

        if favorites.len() < count {
            debug!(
                "Generated {} of {} favorites after {} attempts",
                favorites.len(),
                count,
                attempts
            );
        }

        favorites
    }
}

impl Default for FavoriteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lookup from novel id to the title shown in favorite summaries.
#[derive(Debug, Clone, Default)]
pub struct FavoredIndex {
    titles: HashMap<ObjectId, String>,
}

impl FavoredIndex {
    /// Indexes web novels by their display title (Chinese title, else Japanese).
    pub fn for_web(novels: &[GeneratedWebNovel]) -> Self {
        Self {
            titles: novels
                .iter()
                .map(|n| (n.id, n.display_title().to_string()))
                .collect(),
        }
    }

    /// Indexes wenku novels by their Chinese title.
    pub fn for_wenku(novels: &[GeneratedWenkuNovel]) -> Self {
        Self {
            titles: novels.iter().map(|n| (n.id, n.title_zh.clone())).collect(),
        }
    }

    /// Title for `novel_id`, or [`UNKNOWN_TITLE`] when it is not indexed.
    pub fn title(&self, novel_id: &ObjectId) -> &str {
        self.titles
            .get(novel_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_TITLE)
    }

    /// Summaries of every favorite owned by `user_id`, in favorite order.
    pub fn summaries_for(
        &self,
        user_id: ObjectId,
        favorites: &[GeneratedFavorite],
    ) -> Vec<FavoredNovel> {
        favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .map(|f| FavoredNovel {
                id: f.novel_id.to_hex(),
                title: self.title(&f.novel_id).to_string(),
            })
            .collect()
    }
}

/// Both favorite summary lists for one user, as written back onto the user document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFavorites {
    pub user_id: ObjectId,
    pub favored_web: Vec<FavoredNovel>,
    pub favored_wenku: Vec<FavoredNovel>,
}

/// Recomputes every user's favorite summaries from the authoritative favorite lists.
pub fn favored_summaries(
    users: &[GeneratedUser],
    web_index: &FavoredIndex,
    web_favorites: &[GeneratedFavorite],
    wenku_index: &FavoredIndex,
    wenku_favorites: &[GeneratedFavorite],
) -> Vec<UserFavorites> {
    users
        .iter()
        .map(|user| UserFavorites {
            user_id: user.id,
            favored_web: web_index.summaries_for(user.id, web_favorites),
            favored_wenku: wenku_index.summaries_for(user.id, wenku_favorites),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::user::UserGenerator;
    use crate::generators::web_novel::WebNovelGenerator;

    fn ids(n: usize) -> Vec<ObjectId> {
        (0..n).map(|_| ObjectId::new()).collect()
    }

    #[test]
    fn test_pairs_are_unique() {
        let mut rng = rand::thread_rng();
        let favorites = FavoriteGenerator::new().generate(
            &ids(10),
            &ids(20),
            30,
            OffsetDateTime::now_utc(),
            &mut rng,
        );

        assert!(favorites.len() <= 30);
        let pairs: HashSet<_> = favorites.iter().map(|f| (f.user_id, f.novel_id)).collect();
        assert_eq!(pairs.len(), favorites.len());
    }

    #[test]
    fn test_exhausted_pair_space_under_delivers() {
        let mut rng = rand::thread_rng();
        // Only four distinct pairs exist.
        let favorites = FavoriteGenerator::new().generate(
            &ids(2),
            &ids(2),
            10,
            OffsetDateTime::now_utc(),
            &mut rng,
        );

        assert!(favorites.len() <= 4);
        let pairs: HashSet<_> = favorites.iter().map(|f| (f.user_id, f.novel_id)).collect();
        assert_eq!(pairs.len(), favorites.len());
    }

    #[test]
    fn test_zero_retry_budget() {
        let mut rng = rand::thread_rng();
        let favorites = FavoriteGenerator::new().with_retry_multiplier(0).generate(
            &ids(5),
            &ids(5),
            10,
            OffsetDateTime::now_utc(),
            &mut rng,
        );
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let mut rng = rand::thread_rng();
        let now = OffsetDateTime::now_utc();
        let generator = FavoriteGenerator::new();
        assert!(generator.generate(&[], &ids(3), 5, now, &mut rng).is_empty());
        assert!(generator.generate(&ids(3), &[], 5, now, &mut rng).is_empty());
    }

    #[test]
    fn test_summaries_use_titles_and_sentinel() {
        let mut rng = rand::thread_rng();
        let now = OffsetDateTime::now_utc();
        let users = UserGenerator::new().generate_batch(2, &mut rng);
        let novels = WebNovelGenerator::new().generate_batch(3, now, &mut rng);
        let index = FavoredIndex::for_web(&novels);

        let stranger = ObjectId::new();
        let favorite = |user_id, novel_id| GeneratedFavorite {
            user_id,
            novel_id,
            favored_id: "default".to_string(),
            create_at: DateTime::now(),
            update_at: DateTime::now(),
        };
        let favorites = vec![
            favorite(users[0].id, novels[0].id),
            favorite(users[1].id, novels[1].id),
            favorite(users[0].id, stranger),
        ];

        let summaries = index.summaries_for(users[0].id, &favorites);
        assert_eq!(
            summaries,
            vec![
                FavoredNovel {
                    id: novels[0].id.to_hex(),
                    title: novels[0].display_title().to_string(),
                },
                FavoredNovel {
                    id: stranger.to_hex(),
                    title: UNKNOWN_TITLE.to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_every_user_gets_summaries() {
        let mut rng = rand::thread_rng();
        let now = OffsetDateTime::now_utc();
        let users = UserGenerator::new().generate_batch(4, &mut rng);
        let novels = WebNovelGenerator::new().generate_batch(6, now, &mut rng);
        let user_ids: Vec<_> = users.iter().map(|u| u.id).collect();
        let novel_ids: Vec<_> = novels.iter().map(|n| n.id).collect();

        let web = FavoriteGenerator::new().generate(&user_ids, &novel_ids, 10, now, &mut rng);
        let summaries = favored_summaries(
            &users,
            &FavoredIndex::for_web(&novels),
            &web,
            &FavoredIndex::default(),
            &[],
        );

        assert_eq!(summaries.len(), users.len());
        let total: usize = summaries.iter().map(|s| s.favored_web.len()).sum();
        assert_eq!(total, web.len());
        assert!(summaries.iter().all(|s| s.favored_wenku.is_empty()));
    }
}
