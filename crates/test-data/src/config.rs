//! Configuration types for test data generation.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default MongoDB host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default MongoDB port.
pub const DEFAULT_PORT: u16 = 27017;

/// Default database name.
pub const DEFAULT_DATABASE: &str = "main";

/// Connection settings for the target MongoDB instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl MongoConfig {
    /// Reads `MONGO_HOST`, `MONGO_PORT` and `MONGO_DB` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// A port that does not parse as an integer is replaced by [`DEFAULT_PORT`]
    /// with a warning; every other value falls back to its default silently.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("MONGO_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let database = lookup("MONGO_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let port = match lookup("MONGO_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!("MONGO_PORT must be a number, got {raw:?}; using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            host,
            port,
            database,
        }
    }

    /// Connection string for the configured server.
    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}/", self.host, self.port)
    }
}

/// Entity counts and caps for one seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub user_count: usize,
    pub web_novel_count: usize,
    /// Chapters generated per novel, taken from the front of its table of contents.
    pub chapters_per_novel: usize,
    /// Only this many novels (from the front of the list) get chapter documents.
    pub chapter_novel_limit: usize,
    pub wenku_novel_count: usize,
    pub article_count: usize,
    /// Top-level comments; replies are added on top (a third of this count).
    pub comment_count: usize,
    pub web_favorite_count: usize,
    pub wenku_favorite_count: usize,
    pub read_history_count: usize,
    /// Favorite sampling gives up after `count * favorite_retry_multiplier` draws.
    pub favorite_retry_multiplier: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            user_count: 10,
            web_novel_count: 20,
            chapters_per_novel: 5,
            chapter_novel_limit: 10,
            wenku_novel_count: 15,
            article_count: 15,
            comment_count: 50,
            web_favorite_count: 30,
            wenku_favorite_count: 20,
            read_history_count: 40,
            favorite_retry_multiplier: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = MongoConfig::from_lookup(|_| None);
        assert_eq!(config, MongoConfig::default());
        assert_eq!(config.uri(), "mongodb://localhost:27017/");
    }

    #[test]
    fn test_reads_all_values() {
        let config = MongoConfig::from_lookup(lookup_from(&[
            ("MONGO_HOST", "db.internal"),
            ("MONGO_PORT", "27018"),
            ("MONGO_DB", "staging"),
        ]));
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 27018);
        assert_eq!(config.database, "staging");
        assert_eq!(config.uri(), "mongodb://db.internal:27018/");
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = MongoConfig::from_lookup(lookup_from(&[("MONGO_PORT", "not-a-port")]));
        assert_eq!(config.port, DEFAULT_PORT);

        let config = MongoConfig::from_lookup(lookup_from(&[("MONGO_PORT", "99999")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
