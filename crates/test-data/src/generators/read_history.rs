//! Web novel read-history generation.

use mongodb::bson::DateTime;
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::random::{days_before, pick};
use super::user::GeneratedUser;
use super::web_novel::GeneratedWebNovel;

/// Generated read-history document: a user opened a chapter of a novel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReadHistory {
    pub user_id: ObjectId,
    pub novel_id: ObjectId,
    /// Episode id taken from the novel's table of contents.
    pub chapter_id: String,
    pub create_at: DateTime,
}

/// Generates read-history entries.
#[derive(Debug, Default)]
pub struct ReadHistoryGenerator;

impl ReadHistoryGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Makes `count` draws of a random user and novel, recording a random
    /// chapter from the novel's table of contents.
    ///
    /// Draws that land on a novel with an empty table of contents are skipped,
    /// so the result can be shorter than `count`.
    pub fn generate(
        &self,
        users: &[GeneratedUser],
        novels: &[GeneratedWebNovel],
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedReadHistory> {
        if users.is_empty() || novels.is_empty() {
            return Vec::new();
        }

        let mut history = Vec::with_capacity(count);

        for _ in 0..count {
            let user = pick(rng, users);
            let novel = pick(rng, novels);

            if novel.toc.is_empty() {
                continue;
            }

            let chapter = pick(rng, &novel.toc);
            history.push(GeneratedReadHistory {
                user_id: user.id,
                novel_id: novel.id,
                chapter_id: chapter.episode_id.clone(),
                create_at: days_before(now, 0..=100, rng),
            });
        }

        history
    }
}
