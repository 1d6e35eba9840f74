//! Collection names used by the novel platform.

use std::fmt;

/// A named MongoDB collection the seeder knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Article,
    Comment,
    /// Never written by the seeder, only cleared.
    OperationHistory,
    User,
    WebNovel,
    WebFavorite,
    WebReadHistory,
    WenkuNovel,
    WenkuFavorite,
    WebChapter,
}

impl Collection {
    /// Every collection, in the order they are cleared.
    pub const ALL: [Collection; 10] = [
        Collection::Article,
        Collection::Comment,
        Collection::OperationHistory,
        Collection::User,
        Collection::WebNovel,
        Collection::WebFavorite,
        Collection::WebReadHistory,
        Collection::WenkuNovel,
        Collection::WenkuFavorite,
        Collection::WebChapter,
    ];

    /// Returns the collection name as stored in the database.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Article => "article",
            Collection::Comment => "comment-alt",
            Collection::OperationHistory => "operation-history",
            Collection::User => "user",
            Collection::WebNovel => "metadata",
            Collection::WebFavorite => "web-favorite",
            Collection::WebReadHistory => "web-read-history",
            Collection::WenkuNovel => "wenku-metadata",
            Collection::WenkuFavorite => "wenku-favorite",
            Collection::WebChapter => "episode",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
