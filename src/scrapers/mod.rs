use async_trait::async_trait;
use anyhow::Result;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use crate::config::{Config, SiteConfig};
use crate::error::{ScrapeError, ScrapeResult};
use crate::models::{CatalogDocument, CatalogItem, Site};
use crate::parsers::{parse_product_page, slugify};
use crate::storage::ImageStore;
use crate::utils::http::fetch_page;

mod led_modules;
mod sapphire;

pub use led_modules::LedModulesScraper;
pub use sapphire::SapphireScraper;

#[async_trait]
pub trait VendorScraper: Send + Sync {
    /// Crawl the vendor site. Page and image failures are logged and skipped;
    /// an unreachable home page yields [`VendorScraper::empty_document`].
    async fn scrape(&self, client: &Client, images: &ImageStore) -> Result<CatalogDocument>;
    fn empty_document(&self) -> CatalogDocument;
    fn site_config(&self) -> &SiteConfig;
    fn site(&self) -> Site;
}

/// Scrapers for `only`, or for every site when `only` is empty.
pub fn build_scrapers(config: Arc<Config>, only: &[Site]) -> Vec<Box<dyn VendorScraper>> {
    let wanted = |site: Site| only.is_empty() || only.contains(&site);
    let mut scrapers: Vec<Box<dyn VendorScraper>> = Vec::new();

    if wanted(Site::LedModules) {
        scrapers.push(Box::new(LedModulesScraper::new(config.clone())));
    }
    if wanted(Site::Sapphire) {
        scrapers.push(Box::new(SapphireScraper::new(config)));
    }

    scrapers
}

/// A site's configured home page URL.
pub(crate) fn parse_base_url(base_url: &str) -> ScrapeResult<Url> {
    Url::parse(base_url).map_err(|source| ScrapeError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })
}

/// Fetch one product page and its images into a catalog item.
///
/// The slug is derived from the title; callers make it unique. Images are
/// stored under the same slug prefix.
pub(crate) async fn scrape_product(
    config: &Config,
    client: &Client,
    images: &ImageStore,
    url: &Url,
    max_images: usize,
) -> Option<CatalogItem> {
    let delay = config.request_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let html = match fetch_page(client, url.as_str(), &config.page_fetch()).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Could not fetch product page {}: {}", url, e);
            return None;
        }
    };

    let page = parse_product_page(&html, url, max_images);
    let slug = slugify(&page.title);

    let mut stored = Vec::new();
    for image_url in &page.image_urls {
        if let Some(public_path) = images.store(client, image_url.as_str(), &slug).await {
            stored.push(public_path);
        }
    }

    info!(
        "Parsed \"{}\" ({} specs, {} images) from {}",
        page.title,
        page.specs.len(),
        stored.len(),
        url
    );

    Some(CatalogItem {
        name: page.title,
        slug,
        description: page.description,
        specs: page.specs,
        images: stored,
        source_url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_must_be_absolute() {
        assert_eq!(
            parse_base_url("https://led-modules.ru/").unwrap().as_str(),
            "https://led-modules.ru/"
        );
        let err = parse_base_url("led-modules.ru").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrl { ref url, .. } if url == "led-modules.ru"));
    }

    #[test]
    fn only_filter_selects_scrapers() {
        let config = Arc::new(Config::default());
        let all: Vec<_> = build_scrapers(config.clone(), &[]).iter().map(|s| s.site()).collect();
        assert_eq!(all, vec![Site::LedModules, Site::Sapphire]);

        let only: Vec<_> = build_scrapers(config, &[Site::Sapphire])
            .iter()
            .map(|s| s.site())
            .collect();
        assert_eq!(only, vec![Site::Sapphire]);
    }
}
