//! Test data generation for the novel platform.
//!
//! This crate fabricates users, web novels with chapters, wenku novels with
//! volumes, articles, comments, favorites and read history, and seeds them
//! into MongoDB for manual verification and integration testing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let store = MongoStore::connect(&MongoConfig::from_env()).await?;
//! let result = ScenarioBuilder::new()
//!     .with_users(10)
//!     .with_web_novels(20)
//!     .with_clear_existing(true)
//!     .build(&store, &mut rand::thread_rng())
//!     .await?;
//! println!("{}", result.summary());
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;
pub mod prompt;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioMetrics, ScenarioResult, ScenarioSummary};
    pub use crate::config::{MongoConfig, SeedConfig};
    pub use crate::db::{Collection, FixtureStore, MemoryStore, MongoStore, SeedError, Seeder};
    pub use crate::generators::{
        ArticleGenerator, ChapterGenerator, FavoredIndex, FavoriteGenerator,
        ReadHistoryGenerator, SocialGenerator, UserGenerator, WebNovelGenerator, WenkuGenerator,
    };
}
