//! Japanese and Chinese filler text for titles, introductions and chapter bodies.

use fake::Fake;
use fake::faker::company::raw::CompanyName;
use fake::faker::internet::raw::Username;
use fake::faker::name::raw::Name;
use fake::locales::{JA_JP, ZH_CN};
use rand::Rng;

use super::random::pick;

/// Language of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Japanese,
    Chinese,
}

impl Language {
    fn words(self) -> &'static [&'static str] {
        match self {
            Language::Japanese => JA_WORDS,
            Language::Chinese => ZH_WORDS,
        }
    }
}

const JA_WORDS: &[&str] = &[
    "異世界", "転生", "勇者", "魔王", "令嬢", "婚約", "破棄", "冒険者", "ギルド", "迷宮",
    "魔法", "剣士", "聖女", "王国", "辺境", "領地", "スキル", "チート", "追放", "幼馴染",
    "学園", "騎士", "竜", "精霊", "錬金術", "薬師", "商人", "村人", "旅", "契約",
    "悪役", "溺愛", "最強", "無双", "料理", "スローライフ", "もふもふ", "姫", "皇帝", "復讐",
];

const ZH_WORDS: &[&str] = &[
    "异世界", "转生", "勇者", "魔王", "千金", "婚约", "解除", "冒险者", "公会", "迷宫",
    "魔法", "剑士", "圣女", "王国", "边境", "领地", "技能", "作弊", "流放", "青梅竹马",
    "学园", "骑士", "巨龙", "精灵", "炼金术", "药师", "商人", "村民", "旅行", "契约",
    "反派", "宠爱", "最强", "无双", "料理", "慢生活", "毛茸茸", "公主", "皇帝", "复仇",
];

/// A single vocabulary word.
pub fn word(lang: Language, rng: &mut impl Rng) -> String {
    pick(rng, lang.words()).to_string()
}

/// A sentence of roughly `nb_words` words (±40%), terminated with `。`.
pub fn sentence(lang: Language, nb_words: usize, rng: &mut impl Rng) -> String {
    let nb_words = nb_words.max(1);
    let low = (nb_words * 6 / 10).max(1);
    let high = (nb_words * 14 / 10).max(low);
    let count = rng.gen_range(low..=high);

    let mut out = String::new();
    for i in 0..count {
        if i > 0 && rng.gen_range(0..4) == 0 {
            out.push('、');
        }
        out.push_str(*pick(rng, lang.words()));
    }
    out.push('。');
    out
}

/// Sentences joined into a block of at most `max_chars` characters.
pub fn text(lang: Language, max_chars: usize, rng: &mut impl Rng) -> String {
    let mut out = String::new();
    let mut len = 0;

    loop {
        let next = sentence(lang, 8, rng);
        let next_len = next.chars().count();
        if len + next_len > max_chars {
            break;
        }
        len += next_len;
        out.push_str(&next);
    }

    if out.is_empty() {
        // A single sentence longer than the budget is cut to fit.
        out = sentence(lang, 8, rng).chars().take(max_chars).collect();
    }
    out
}

/// A person name in the given language.
pub fn person_name(lang: Language, rng: &mut impl Rng) -> String {
    match lang {
        Language::Japanese => Name(JA_JP).fake_with_rng(rng),
        Language::Chinese => Name(ZH_CN).fake_with_rng(rng),
    }
}

/// A Japanese publisher name.
pub fn company(rng: &mut impl Rng) -> String {
    CompanyName(JA_JP).fake_with_rng(rng)
}

/// A login-style user name.
pub fn username(rng: &mut impl Rng) -> String {
    Username(ZH_CN).fake_with_rng(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_shape() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let s = sentence(Language::Japanese, 6, &mut rng);
            assert!(s.ends_with('。'));
            assert!(s.chars().count() > 1);
        }
    }

    #[test]
    fn test_sentence_uses_vocabulary_words() {
        let mut rng = rand::thread_rng();
        for lang in [Language::Japanese, Language::Chinese] {
            let mut rest = sentence(lang, 5, &mut rng).replace(['、', '。'], "");
            while !rest.is_empty() {
                let word = lang
                    .words()
                    .iter()
                    .filter(|w| rest.starts_with(**w))
                    .max_by_key(|w| w.len())
                    .unwrap_or_else(|| panic!("no vocabulary word prefixes {rest:?}"));
                rest = rest[word.len()..].to_string();
            }
        }
    }

    #[test]
    fn test_text_respects_budget() {
        let mut rng = rand::thread_rng();
        for max in [5, 50, 300, 2000] {
            let t = text(Language::Chinese, max, &mut rng);
            assert!(!t.is_empty());
            assert!(t.chars().count() <= max, "{} > {max}", t.chars().count());
        }
    }

    #[test]
    fn test_names_are_not_empty() {
        let mut rng = rand::thread_rng();
        assert!(!person_name(Language::Japanese, &mut rng).is_empty());
        assert!(!person_name(Language::Chinese, &mut rng).is_empty());
        assert!(!company(&mut rng).is_empty());
        assert!(!username(&mut rng).is_empty());
    }
}
