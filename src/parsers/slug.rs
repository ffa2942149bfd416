use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_SLUG_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-zA-Zа-яА-Я0-9]+")
        .expect("Invalid slug regex")
});

pub const FALLBACK_SLUG: &str = "item";

/// Lowercase, turn every run of non-alphanumeric characters into `-`, trim dashes.
///
/// Latin and Cyrillic letters are kept as is (no transliteration), so
/// `"Модуль P10 (outdoor)"` becomes `"модуль-p10-outdoor"`.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let dashed = NON_SLUG_RUN.replace_all(&lowered, "-");
    let trimmed = dashed.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Hands out slugs that are unique within one document.
///
/// The first claim of a slug returns it unchanged; later claims get `-2`, `-3`, ...
#[derive(Debug, Default)]
pub struct SlugRegistry {
    taken: HashSet<String>,
}

impl SlugRegistry {
    pub fn claim(&mut self, slug: &str) -> String {
        let mut candidate = slug.to_string();
        let mut suffix = 2;
        while self.taken.contains(&candidate) {
            candidate = format!("{slug}-{suffix}");
            suffix += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}
