//! Web chapter (episode) generation.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::random::maybe;
use super::text::{self, Language};
use super::web_novel::GeneratedWebNovel;

/// Generated chapter document, keyed by `(providerId, bookId, episodeId)`.
///
/// Besides the Japanese source text it carries up to four independent
/// translations (baidu in `paragraphsZh`, youdao, gpt, sakura), each with its
/// own glossary slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWebChapter {
    pub provider_id: String,
    pub book_id: String,
    pub episode_id: String,
    pub paragraphs_jp: Vec<String>,

    pub glossary_uuid: Option<String>,
    pub glossary: HashMap<String, String>,
    pub paragraphs_zh: Option<Vec<String>>,

    pub youdao_glossary_uuid: Option<String>,
    pub youdao_glossary: HashMap<String, String>,
    pub youdao_paragraphs: Option<Vec<String>>,

    pub gpt_glossary_uuid: Option<String>,
    pub gpt_glossary: HashMap<String, String>,
    pub gpt_paragraphs: Option<Vec<String>>,

    pub sakura_version: Option<String>,
    pub sakura_glossary_uuid: Option<String>,
    pub sakura_glossary: HashMap<String, String>,
    pub sakura_paragraphs: Option<Vec<String>>,
}

/// Configuration for chapter generation.
#[derive(Debug, Clone)]
pub struct ChapterGenConfig {
    /// Paragraph count range for source text and each translation.
    pub paragraphs: (usize, usize),
    pub baidu_chance: u32,
    pub youdao_chance: u32,
    pub gpt_chance: u32,
    pub sakura_chance: u32,
    /// Version tag stored alongside sakura translations.
    pub sakura_version: String,
}

impl Default for ChapterGenConfig {
    fn default() -> Self {
        Self {
            paragraphs: (10, 30),
            baidu_chance: 60,
            youdao_chance: 25,
            gpt_chance: 25,
            sakura_chance: 25,
            sakura_version: "0.9".to_string(),
        }
    }
}

/// Generates chapter documents from web novel tables of contents.
pub struct ChapterGenerator {
    config: ChapterGenConfig,
}

impl ChapterGenerator {
    /// Creates a new chapter generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: ChapterGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: ChapterGenConfig) -> Self {
        Self { config }
    }

    /// Generates the chapter for one table-of-contents entry.
    pub fn generate(
        &self,
        novel: &GeneratedWebNovel,
        episode_id: &str,
        rng: &mut impl Rng,
    ) -> GeneratedWebChapter {
        let c = &self.config;

        let paragraphs_jp = self.paragraphs(Language::Japanese, 20, rng);
        let paragraphs_zh = maybe(rng, c.baidu_chance, |rng| {
            self.paragraphs(Language::Chinese, 25, rng)
        });
        let youdao_paragraphs = maybe(rng, c.youdao_chance, |rng| {
            self.paragraphs(Language::Chinese, 25, rng)
        });
        let gpt_paragraphs = maybe(rng, c.gpt_chance, |rng| {
            self.paragraphs(Language::Chinese, 25, rng)
        });
        let sakura_paragraphs = maybe(rng, c.sakura_chance, |rng| {
            self.paragraphs(Language::Chinese, 25, rng)
        });
        let sakura_version = sakura_paragraphs
            .as_ref()
            .map(|_| c.sakura_version.clone());

        GeneratedWebChapter {
            provider_id: novel.provider_id.clone(),
            book_id: novel.book_id.clone(),
            episode_id: episode_id.to_string(),
            paragraphs_jp,
            glossary_uuid: None,
            glossary: HashMap::new(),
            paragraphs_zh,
            youdao_glossary_uuid: None,
            youdao_glossary: HashMap::new(),
            youdao_paragraphs,
            gpt_glossary_uuid: None,
            gpt_glossary: HashMap::new(),
            gpt_paragraphs,
            sakura_version,
            sakura_glossary_uuid: None,
            sakura_glossary: HashMap::new(),
            sakura_paragraphs,
        }
    }

    /// Generates chapters for the first `novel_limit` novels, using the first
    /// `per_novel` entries of each table of contents.
    pub fn generate_for_novels(
        &self,
        novels: &[GeneratedWebNovel],
        novel_limit: usize,
        per_novel: usize,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedWebChapter> {
        let mut chapters = Vec::new();

        for novel in novels.iter().take(novel_limit) {
            for entry in novel.toc.iter().take(per_novel) {
                chapters.push(self.generate(novel, &entry.episode_id, rng));
            }
        }

        chapters
    }

    fn paragraphs(&self, lang: Language, nb_words: usize, rng: &mut impl Rng) -> Vec<String> {
        let (low, high) = self.config.paragraphs;
        let count = rng.gen_range(low..=high);
        (0..count)
            .map(|_| text::sentence(lang, nb_words, rng))
            .collect()
    }
}

impl Default for ChapterGenerator {
    fn default() -> Self {
        Self::new()
    }
}
