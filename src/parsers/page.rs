use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

use super::{
    category_links, clean_text, element_text, extract_specs, product_links, resolve_url,
    unique_preserving_order, LinkRule,
};
use crate::models::{Contacts, SpecTable};

static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("Invalid h1 selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("Invalid p selector"));
static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("Invalid table selector"));
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").expect("Invalid img selector"));
static PHONE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href^='tel:']").expect("Invalid tel selector"));
static MAIL_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href^='mailto:']").expect("Invalid mailto selector"));
static ADVANTAGE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("li, .advantage, .benefit").expect("Invalid advantage selector")
});

const DESCRIPTION_PARAGRAPHS: usize = 4;
pub const MAX_ADVANTAGES: usize = 12;

/// What the led-modules.ru home page contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedModulesHome {
    pub contacts: Contacts,
    pub category_links: Vec<Url>,
}

/// What the sapphire-led.com home page contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SapphireHome {
    pub advantages: Vec<String>,
    pub contacts: Contacts,
    pub product_links: Vec<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPage {
    pub name: String,
    pub product_links: Vec<Url>,
}

/// Fields of a product or series page, before images are downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPage {
    pub title: String,
    pub description: String,
    pub specs: SpecTable,
    pub image_urls: Vec<Url>,
}

pub fn parse_led_modules_home(html: &str, base: &Url, max_category_links: usize) -> LedModulesHome {
    let document = Html::parse_document(html);
    LedModulesHome {
        contacts: extract_contacts(&document),
        category_links: category_links(&document, base, max_category_links),
    }
}

pub fn parse_sapphire_home(html: &str, base: &Url, max_products: usize) -> SapphireHome {
    let document = Html::parse_document(html);
    SapphireHome {
        advantages: extract_advantages(&document, MAX_ADVANTAGES),
        contacts: extract_contacts(&document),
        product_links: product_links(&document, base, LinkRule::SapphireProduct, max_products),
    }
}

pub fn parse_category_page(html: &str, page_url: &Url, max_products: usize) -> CategoryPage {
    let document = Html::parse_document(html);
    CategoryPage {
        name: heading_or_url(&document, page_url),
        product_links: product_links(&document, page_url, LinkRule::LedModulesProduct, max_products),
    }
}

pub fn parse_product_page(html: &str, page_url: &Url, max_images: usize) -> ProductPage {
    let document = Html::parse_document(html);

    let paragraphs = document
        .select(&PARAGRAPH)
        .take(DESCRIPTION_PARAGRAPHS)
        .map(element_text)
        .collect::<Vec<_>>();

    let specs = document
        .select(&TABLE)
        .next()
        .map(extract_specs)
        .unwrap_or_default();

    // An empty src would resolve to the page itself.
    let image_urls = document
        .select(&IMAGE)
        .take(max_images)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.trim().is_empty())
        .filter_map(|src| resolve_url(page_url, src))
        .collect();

    ProductPage {
        title: heading_or_url(&document, page_url),
        description: clean_text(&paragraphs.join(" ")),
        specs,
        image_urls,
    }
}

/// Text of the first `h1`, or the page URL when there is none.
fn heading_or_url(document: &Html, page_url: &Url) -> String {
    document
        .select(&HEADING)
        .next()
        .map(element_text)
        .unwrap_or_else(|| clean_text(page_url.as_str()))
}

/// Visible text of `tel:` and `mailto:` links, each list sorted and de-duplicated.
pub fn extract_contacts(document: &Html) -> Contacts {
    let collect = |selector: &Selector| {
        document
            .select(selector)
            .map(element_text)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
    };

    Contacts {
        phones: Some(collect(&PHONE_LINK)),
        emails: Some(collect(&MAIL_LINK)),
    }
}

/// Short list items and `.advantage`/`.benefit` blocks: 9 to 159 characters, unique.
pub fn extract_advantages(document: &Html, limit: usize) -> Vec<String> {
    let texts = document
        .select(&ADVANTAGE)
        .map(element_text)
        .filter(|text| {
            let chars = text.chars().count();
            chars > 8 && chars < 160
        });

    unique_preserving_order(texts)
        .into_iter()
        .take(limit)
        .collect()
}
