use async_trait::async_trait;
use anyhow::Result;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{Config, SiteConfig};
use crate::models::{CatalogDocument, SapphireCatalog, Site};
use crate::parsers::{parse_sapphire_home, SlugRegistry};
use crate::scrapers::{parse_base_url, scrape_product, VendorScraper};
use crate::storage::ImageStore;
use crate::utils::http::fetch_page;

/// sapphire-led.com: home page → series pages.
pub struct SapphireScraper {
    config: Arc<Config>,
}

impl SapphireScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl VendorScraper for SapphireScraper {
    async fn scrape(&self, client: &Client, images: &ImageStore) -> Result<CatalogDocument> {
        let site_config = self.site_config();
        info!("Scraping {}...", site_config.title);

        let base = parse_base_url(&site_config.base_url)?;
        let mut catalog = SapphireCatalog::empty(&site_config.title, &site_config.base_url);

        let html = match fetch_page(client, base.as_str(), &self.config.page_fetch()).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Could not fetch {} home page: {}", site_config.title, e);
                return Ok(catalog.into());
            }
        };

        let home = parse_sapphire_home(&html, &base, site_config.max_products);
        catalog.advantages = home.advantages;
        catalog.contacts = home.contacts;
        info!(
            "Found {} advantages and {} series links on {}",
            catalog.advantages.len(),
            home.product_links.len(),
            site_config.title
        );

        let mut slugs = SlugRegistry::default();
        for url in &home.product_links {
            if let Some(mut item) =
                scrape_product(&self.config, client, images, url, site_config.max_images).await
            {
                // Series with the same title are published as `slug`, `slug-2`, ...
                item.slug = slugs.claim(&item.slug);
                catalog.series.push(item);
            }
        }

        Ok(catalog.into())
    }

    fn empty_document(&self) -> CatalogDocument {
        let site_config = self.site_config();
        SapphireCatalog::empty(&site_config.title, &site_config.base_url).into()
    }

    fn site_config(&self) -> &SiteConfig {
        &self.config.sites.sapphire
    }

    fn site(&self) -> Site {
        Site::Sapphire
    }
}
