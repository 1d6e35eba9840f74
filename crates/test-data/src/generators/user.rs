//! User generation.

use mongodb::bson::oid::ObjectId;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::random::chance;
use super::text;

/// Denormalized `{id, title}` entry in a user's favorite list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoredNovel {
    pub id: String,
    pub title: String,
}

/// Generated user document ready for database insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedUser {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub favored_web: Vec<FavoredNovel>,
    pub favored_wenku: Vec<FavoredNovel>,
    pub read_history_paused: bool,
}

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Percent chance that read-history recording is paused.
    pub read_history_paused_chance: u32,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            read_history_paused_chance: 20,
        }
    }
}

/// Generates user documents with empty favorite lists.
///
/// Favorite summaries are filled in later by the cross-reference pass.
pub struct UserGenerator {
    config: UserGenConfig,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: UserGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single user.
    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedUser {
        let suffix: u32 = rng.gen_range(100..=999);
        let username = format!("{}{suffix}", text::username(rng));

        GeneratedUser {
            id: ObjectId::new(),
            username,
            favored_web: Vec::new(),
            favored_wenku: Vec::new(),
            read_history_paused: chance(rng, self.config.read_history_paused_chance),
        }
    }

    /// Generates multiple users.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedUser> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}
