//! Entity generators for test data.
//!
//! This module provides generators for creating realistic fixture documents:
//! - [`UserGenerator`]: Generate users with empty favorite summaries
//! - [`WebNovelGenerator`]: Web novels with tables of contents
//! - [`ChapterGenerator`]: Chapter bodies and translations for toc entries
//! - [`WenkuGenerator`]: Wenku novels with volumes
//! - [`ArticleGenerator`]: Forum articles
//! - [`SocialGenerator`]: Comments and replies on articles
//! - [`FavoriteGenerator`]: Unique user/novel favorites, plus [`FavoredIndex`] summaries
//! - [`ReadHistoryGenerator`]: Chapter read history

pub mod article;
pub mod chapter;
pub mod favorite;
pub mod random;
pub mod read_history;
pub mod social;
pub mod text;
pub mod user;
pub mod web_novel;
pub mod wenku;

pub use article::{ArticleCategory, ArticleGenerator, GeneratedArticle};
pub use chapter::{ChapterGenerator, GeneratedWebChapter};
pub use favorite::{
    FavoredIndex, FavoriteGenerator, GeneratedFavorite, UNKNOWN_TITLE, UserFavorites,
    favored_summaries,
};
pub use read_history::{GeneratedReadHistory, ReadHistoryGenerator};
pub use social::{GeneratedComment, SocialGenerator};
pub use user::{FavoredNovel, GeneratedUser, UserGenerator};
pub use web_novel::{GeneratedWebNovel, TocEntry, WebNovelGenerator, WebNovelType};
pub use wenku::{GeneratedVolume, GeneratedWenkuNovel, WenkuGenerator, WenkuLevel};
