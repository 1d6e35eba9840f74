//! Web novel generation with tables of contents.

use std::collections::HashMap;

use mongodb::bson::DateTime;
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::random::{chance, days_before, hours_before, maybe, pick, uuid_string};
use super::text::{self, Language};

/// Glossary id stored on novels that have no glossary yet.
pub const NO_GLOSSARY: &str = "no glossary";

/// Source sites a web novel can be synced from.
pub const PROVIDERS: &[&str] = &["syosetu", "kakuyomu", "novelup", "hameln", "pixiv", "alphapolis"];

/// Serialization status of a web novel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebNovelType {
    #[serde(rename = "连载中")]
    Ongoing,
    #[serde(rename = "已完结")]
    Completed,
    #[serde(rename = "短篇")]
    ShortStory,
}

impl WebNovelType {
    pub const ALL: [WebNovelType; 3] = [
        WebNovelType::Ongoing,
        WebNovelType::Completed,
        WebNovelType::ShortStory,
    ];
}

/// Content warnings attached to a web novel.
pub const ATTENTIONS: &[&str] = &["R15", "R18", "残酷描写", "暴力描写", "性描写"];

/// Author credit with a profile link on the provider site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNovelAuthor {
    pub name: String,
    pub link: String,
}

/// Chapter stub in a web novel's table of contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub title_jp: String,
    pub title_zh: Option<String>,
    pub episode_id: String,
    pub create_at: DateTime,
}

/// Generated web novel metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWebNovel {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub provider_id: String,
    pub book_id: String,
    pub wenku_id: Option<String>,
    pub title_jp: String,
    pub title_zh: Option<String>,
    pub authors: Vec<WebNovelAuthor>,
    #[serde(rename = "type")]
    pub novel_type: WebNovelType,
    pub attentions: Vec<String>,
    pub keywords: Vec<String>,
    pub points: Option<i32>,
    pub total_characters: Option<i32>,
    pub introduction_jp: String,
    pub introduction_zh: Option<String>,
    pub glossary_uuid: String,
    pub glossary: HashMap<String, String>,
    pub toc: Vec<TocEntry>,
    pub jp: i32,
    pub baidu: i32,
    pub youdao: i32,
    pub gpt: i32,
    pub sakura: i32,
    pub visited: i32,
    pub pause_update: bool,
    pub sync_at: DateTime,
    pub change_at: DateTime,
    pub update_at: DateTime,
}

impl GeneratedWebNovel {
    /// Title shown in favorite lists: the translated title when present.
    pub fn display_title(&self) -> &str {
        self.title_zh.as_deref().unwrap_or(&self.title_jp)
    }
}

/// Configuration for web novel generation.
#[derive(Debug, Clone)]
pub struct WebNovelGenConfig {
    /// Table-of-contents length range.
    pub toc_len: (usize, usize),
    pub wenku_link_chance: u32,
    pub title_zh_chance: u32,
    pub points_chance: u32,
    pub total_characters_chance: u32,
    pub introduction_zh_chance: u32,
    pub toc_title_zh_chance: u32,
    pub pause_update_chance: u32,
}

impl Default for WebNovelGenConfig {
    fn default() -> Self {
        Self {
            toc_len: (5, 50),
            wenku_link_chance: 20,
            title_zh_chance: 70,
            points_chance: 80,
            total_characters_chance: 80,
            introduction_zh_chance: 60,
            toc_title_zh_chance: 60,
            pause_update_chance: 10,
        }
    }
}

/// Generates web novels.
pub struct WebNovelGenerator {
    config: WebNovelGenConfig,
}

impl WebNovelGenerator {
    /// Creates a new web novel generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: WebNovelGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: WebNovelGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single web novel relative to `now`.
    pub fn generate(&self, now: OffsetDateTime, rng: &mut impl Rng) -> GeneratedWebNovel {
        let c = &self.config;
        let provider_id = pick(rng, PROVIDERS).to_string();

        let author = WebNovelAuthor {
            name: text::person_name(Language::Japanese, rng),
            link: format!("https://{provider_id}.com/user/{}", uuid_string(rng)),
        };

        let attention_count = rng.gen_range(0..=3);
        let attentions = ATTENTIONS
            .choose_multiple(rng, attention_count)
            .map(|a| a.to_string())
            .collect();

        let keyword_count = rng.gen_range(3..=8);
        let keywords = (0..keyword_count)
            .map(|_| text::word(Language::Japanese, rng))
            .collect();

        let toc_len = rng.gen_range(c.toc_len.0..=c.toc_len.1);

        GeneratedWebNovel {
            id: ObjectId::new(),
            book_id: uuid_string(rng),
            wenku_id: maybe(rng, c.wenku_link_chance, |rng| uuid_string(rng)),
            title_jp: text::sentence(Language::Japanese, 6, rng),
            title_zh: maybe(rng, c.title_zh_chance, |rng| {
                text::sentence(Language::Chinese, 8, rng)
            }),
            authors: vec![author],
            novel_type: *pick(rng, &WebNovelType::ALL),
            attentions,
            keywords,
            points: maybe(rng, c.points_chance, |rng| rng.gen_range(100..=10_000)),
            total_characters: maybe(rng, c.total_characters_chance, |rng| {
                rng.gen_range(10_000..=1_000_000)
            }),
            introduction_jp: text::text(Language::Japanese, 300, rng),
            introduction_zh: maybe(rng, c.introduction_zh_chance, |rng| {
                text::text(Language::Chinese, 300, rng)
            }),
            glossary_uuid: NO_GLOSSARY.to_string(),
            glossary: HashMap::new(),
            toc: self.generate_toc(toc_len, now, rng),
            jp: rng.gen_range(0..=100),
            baidu: rng.gen_range(0..=100),
            youdao: rng.gen_range(0..=100),
            gpt: rng.gen_range(0..=100),
            sakura: rng.gen_range(0..=100),
            visited: rng.gen_range(0..=10_000),
            pause_update: chance(rng, c.pause_update_chance),
            sync_at: hours_before(now, 1..=240, rng),
            change_at: hours_before(now, 1..=120, rng),
            update_at: hours_before(now, 0..=72, rng),
            provider_id,
        }
    }

    /// Generates multiple web novels.
    pub fn generate_batch(
        &self,
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedWebNovel> {
        (0..count).map(|_| self.generate(now, rng)).collect()
    }

    /// Generates a table of contents with `count` numbered entries.
    pub fn generate_toc(
        &self,
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<TocEntry> {
        (1..=count)
            .map(|n| TocEntry {
                title_jp: format!("{} - {n}", text::sentence(Language::Japanese, 4, rng)),
                title_zh: maybe(rng, self.config.toc_title_zh_chance, |rng| {
                    text::sentence(Language::Chinese, 5, rng)
                }),
                episode_id: uuid_string(rng),
                create_at: days_before(now, 1..=365, rng),
            })
            .collect()
    }
}

impl Default for WebNovelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_novel_type_stored_strings() {
        let stored: Vec<_> = WebNovelType::ALL
            .iter()
            .map(|t| serde_json::to_value(t).unwrap())
            .collect();
        assert_eq!(stored, ["连载中", "已完结", "短篇"]);
    }

    #[test]
    fn test_generate_web_novel() {
        let novel_gen = WebNovelGenerator::new();
        let mut rng = rand::thread_rng();
        let novel = novel_gen.generate(OffsetDateTime::now_utc(), &mut rng);

        assert!(PROVIDERS.contains(&novel.provider_id.as_str()));
        assert!((5..=50).contains(&novel.toc.len()));
        assert!((3..=8).contains(&novel.keywords.len()));
        assert!(novel.attentions.len() <= 3);
        assert_eq!(novel.glossary_uuid, NO_GLOSSARY);
        assert!(novel.glossary.is_empty());
        assert_eq!(novel.authors.len(), 1);
        assert!(
            novel.authors[0]
                .link
                .starts_with(&format!("https://{}.com/user/", novel.provider_id))
        );
        assert!(novel.introduction_jp.chars().count() <= 300);
    }

    #[test]
    fn test_attentions_are_distinct() {
        let novel_gen = WebNovelGenerator::new();
        let mut rng = rand::thread_rng();

        for novel in novel_gen.generate_batch(30, OffsetDateTime::now_utc(), &mut rng) {
            let unique: std::collections::HashSet<_> = novel.attentions.iter().collect();
            assert_eq!(unique.len(), novel.attentions.len());
        }
    }

    #[test]
    fn test_toc_numbering() {
        let novel_gen = WebNovelGenerator::new();
        let mut rng = rand::thread_rng();
        let toc = novel_gen.generate_toc(12, OffsetDateTime::now_utc(), &mut rng);

        assert_eq!(toc.len(), 12);
        for (i, entry) in toc.iter().enumerate() {
            assert!(entry.title_jp.ends_with(&format!(" - {}", i + 1)));
        }
        let ids: std::collections::HashSet<_> = toc.iter().map(|e| &e.episode_id).collect();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_display_title_prefers_translation() {
        let novel_gen = WebNovelGenerator::with_config(WebNovelGenConfig {
            title_zh_chance: 0,
            ..Default::default()
        });
        let mut rng = rand::thread_rng();
        let mut novel = novel_gen.generate(OffsetDateTime::now_utc(), &mut rng);

        assert!(novel.title_zh.is_none());
        assert_eq!(novel.display_title(), novel.title_jp);

        novel.title_zh = Some("译名".to_string());
        assert_eq!(novel.display_title(), "译名");
    }

    #[test]
    fn test_optional_fields_serialize_as_null() {
        let novel_gen = WebNovelGenerator::with_config(WebNovelGenConfig {
            wenku_link_chance: 0,
            title_zh_chance: 0,
            points_chance: 0,
            ..Default::default()
        });
        let mut rng = rand::thread_rng();
        let novel = novel_gen.generate(OffsetDateTime::now_utc(), &mut rng);
        let value = serde_json::to_value(&novel).unwrap();

        assert!(value["wenkuId"].is_null());
        assert!(value["titleZh"].is_null());
        assert!(value["points"].is_null());
        assert!(value["type"].is_string());
        assert!(value["toc"][0]["episodeId"].is_string());
    }
}
