use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::hash::Hash;
use url::Url;

use super::element_text;

static CATALOG_ANCHOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href*='catalog'], a[href*='katalog']")
        .expect("Invalid catalog link selector")
});
static ANY_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Invalid anchor selector"));

/// Anchors whose visible text is this short (in characters) are navigation noise.
const MIN_LINK_TEXT_CHARS: usize = 4;

/// How a page's anchors are recognised as product pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRule {
    /// Category pages on led-modules.ru: case-sensitive `product`, `товар` or `catalog` in the href.
    LedModulesProduct,
    /// Home page of sapphire-led.com: `series`, `product` or `produk` anywhere in the lower-cased href.
    SapphireProduct,
}

impl LinkRule {
    pub fn matches(&self, href: &str, text: &str) -> bool {
        if href.is_empty() || text.chars().count() < MIN_LINK_TEXT_CHARS {
            return false;
        }
        match self {
            LinkRule::LedModulesProduct => ["product", "товар", "catalog"]
                .iter()
                .any(|needle| href.contains(needle)),
            LinkRule::SapphireProduct => {
                let href = href.to_lowercase();
                ["series", "product", "produk"]
                    .iter()
                    .any(|needle| href.contains(needle))
            }
        }
    }
}

pub fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}

/// Drop repeats, keeping the first occurrence of each value.
pub fn unique_preserving_order<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Category pages linked from the led-modules.ru home page.
///
/// The first `limit` raw links are considered before repeats are dropped, so
/// duplicates count against the limit.
pub fn category_links(document: &Html, base: &Url, limit: usize) -> Vec<Url> {
    let raw = document
        .select(&CATALOG_ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .filter_map(|href| resolve_url(base, href))
        .take(limit);

    unique_preserving_order(raw)
}

/// Product pages linked from `document`, resolved against `base`, first `limit` unique.
pub fn product_links(document: &Html, base: &Url, rule: LinkRule, limit: usize) -> Vec<Url> {
    let candidates = document.select(&ANY_ANCHOR).filter_map(|a| {
        let href = a.value().attr("href")?;
        if rule.matches(href, &element_text(a)) {
            resolve_url(base, href)
        } else {
            None
        }
    });

    unique_preserving_order(candidates)
        .into_iter()
        .take(limit)
        .collect()
}
