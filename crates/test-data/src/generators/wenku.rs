//! Wenku (published light novel) generation with volumes.

use std::collections::HashMap;

use mongodb::bson::DateTime;
use mongodb::bson::oid::ObjectId;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::random::{days_before, hours_before, maybe, pick, unix_millis, uuid_string};
use super::text::{self, Language};

/// Content maturity level of a wenku novel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WenkuLevel {
    #[serde(rename = "轻小说")]
    LightNovel,
    #[serde(rename = "轻文学")]
    LightLiterature,
    #[serde(rename = "文学")]
    Literature,
    #[serde(rename = "R18男性向")]
    AdultMale,
    #[serde(rename = "R18女性向")]
    AdultFemale,
    #[serde(rename = "非小说")]
    NonFiction,
}

impl WenkuLevel {
    pub const ALL: [WenkuLevel; 6] = [
        WenkuLevel::LightNovel,
        WenkuLevel::LightLiterature,
        WenkuLevel::Literature,
        WenkuLevel::AdultMale,
        WenkuLevel::AdultFemale,
        WenkuLevel::NonFiction,
    ];
}

/// A published volume of a wenku novel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVolume {
    pub asin: String,
    pub title: String,
    pub title_zh: Option<String>,
    pub cover: String,
    pub cover_hires: Option<String>,
    pub publisher: Option<String>,
    pub imprint: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub publish_at: Option<i64>,
}

/// Generated wenku novel metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWenkuNovel {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub title_zh: String,
    pub cover: Option<String>,
    pub authors: Vec<String>,
    pub artists: Vec<String>,
    pub keywords: Vec<String>,
    pub publisher: Option<String>,
    pub imprint: Option<String>,
    pub latest_publish_at: Option<DateTime>,
    pub level: WenkuLevel,
    pub introduction: String,
    pub web_ids: Vec<String>,
    pub volumes: Vec<GeneratedVolume>,
    pub glossary_uuid: Option<String>,
    pub glossary: HashMap<String, String>,
    pub visited: i32,
    pub update_at: DateTime,
}

/// Configuration for wenku novel generation.
#[derive(Debug, Clone)]
pub struct WenkuGenConfig {
    /// Volume count range.
    pub volumes: (usize, usize),
    /// Maximum number of linked web novels.
    pub max_web_links: usize,
    pub cover_chance: u32,
    pub publisher_chance: u32,
    pub imprint_chance: u32,
    pub latest_publish_chance: u32,
    pub glossary_uuid_chance: u32,
    pub volume_title_zh_chance: u32,
    pub volume_cover_hires_chance: u32,
    pub volume_publish_at_chance: u32,
}

impl Default for WenkuGenConfig {
    fn default() -> Self {
        Self {
            volumes: (1, 10),
            max_web_links: 3,
            cover_chance: 80,
            publisher_chance: 80,
            imprint_chance: 60,
            latest_publish_chance: 80,
            glossary_uuid_chance: 30,
            volume_title_zh_chance: 70,
            volume_cover_hires_chance: 60,
            volume_publish_at_chance: 80,
        }
    }
}

/// Generates wenku novels.
pub struct WenkuGenerator {
    config: WenkuGenConfig,
}

impl WenkuGenerator {
    /// Creates a new wenku generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: WenkuGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: WenkuGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single wenku novel, linking it to a few of `web_ids`.
    pub fn generate(
        &self,
        web_ids: &[ObjectId],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> GeneratedWenkuNovel {
        let c = &self.config;

        let author_count = rng.gen_range(1..=2);
        let artist_count = rng.gen_range(0..=2);
        let keyword_count = rng.gen_range(3..=10);
        let glossary_count = rng.gen_range(0..=5);
        let link_count = rng.gen_range(0..=c.max_web_links).min(web_ids.len());
        let volume_count = rng.gen_range(c.volumes.0..=c.volumes.1);

        GeneratedWenkuNovel {
            id: ObjectId::new(),
            title: text::sentence(Language::Japanese, 6, rng),
            title_zh: text::sentence(Language::Chinese, 8, rng),
            cover: maybe(rng, c.cover_chance, |rng| {
                format!("https://example.com/covers/{}.jpg", uuid_string(rng))
            }),
            authors: (0..author_count)
                .map(|_| text::person_name(Language::Japanese, rng))
                .collect(),
            artists: (0..artist_count)
                .map(|_| text::person_name(Language::Japanese, rng))
                .collect(),
            keywords: (0..keyword_count)
                .map(|_| text::word(Language::Chinese, rng))
                .collect(),
            publisher: maybe(rng, c.publisher_chance, |rng| text::company(rng)),
            imprint: maybe(rng, c.imprint_chance, |rng| {
                text::word(Language::Japanese, rng)
            }),
            latest_publish_at: maybe(rng, c.latest_publish_chance, |rng| {
                days_before(now, 1..=1000, rng)
            }),
            level: *pick(rng, &WenkuLevel::ALL),
            introduction: text::text(Language::Chinese, 400, rng),
            web_ids: web_ids
                .choose_multiple(rng, link_count)
                .map(|id| id.to_hex())
                .collect(),
            volumes: self.generate_volumes(volume_count, now, rng),
            glossary_uuid: maybe(rng, c.glossary_uuid_chance, |rng| uuid_string(rng)),
            glossary: (0..glossary_count)
                .map(|_| {
                    (
                        text::word(Language::Japanese, rng),
                        text::word(Language::Chinese, rng),
                    )
                })
                .collect(),
            visited: rng.gen_range(0..=5_000),
            update_at: hours_before(now, 0..=720, rng),
        }
    }

    /// Generates multiple wenku novels.
    pub fn generate_batch(
        &self,
        count: usize,
        web_ids: &[ObjectId],
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedWenkuNovel> {
        (0..count).map(|_| self.generate(web_ids, now, rng)).collect()
    }

    /// Generates `count` numbered volumes.
    pub fn generate_volumes(
        &self,
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedVolume> {
        let c = &self.config;

        (1..=count)
            .map(|n| GeneratedVolume {
                asin: asin(rng),
                title: format!("{} 第{n}巻", text::sentence(Language::Japanese, 5, rng)),
                title_zh: maybe(rng, c.volume_title_zh_chance, |rng| {
                    format!("{} 第{n}卷", text::sentence(Language::Chinese, 6, rng))
                }),
                cover: format!("https://example.com/volumes/{}.jpg", uuid_string(rng)),
                cover_hires: maybe(rng, c.volume_cover_hires_chance, |rng| {
                    format!("https://example.com/volumes/{}_hires.jpg", uuid_string(rng))
                }),
                publisher: maybe(rng, c.publisher_chance, |rng| text::company(rng)),
                imprint: maybe(rng, c.imprint_chance, |rng| {
                    text::word(Language::Japanese, rng)
                }),
                publish_at: maybe(rng, c.volume_publish_at_chance, |rng| {
                    unix_millis(now - Duration::days(rng.gen_range(30..=3000)))
                }),
            })
            .collect()
    }
}

impl Default for WenkuGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Amazon-style catalog id: two uppercase letters followed by eight digits.
fn asin(rng: &mut impl Rng) -> String {
    let mut code = String::with_capacity(10);
    for _ in 0..2 {
        code.push(char::from(rng.gen_range(b'A'..=b'Z')));
    }
    for _ in 0..8 {
        code.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    code
}
