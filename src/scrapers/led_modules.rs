use async_trait::async_trait;
use anyhow::Result;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use crate::config::{Config, SiteConfig};
use crate::models::{CatalogDocument, Category, LedModulesCatalog, Site};
use crate::parsers::{parse_category_page, parse_led_modules_home, slugify, SlugRegistry};
use crate::scrapers::{parse_base_url, scrape_product, VendorScraper};
use crate::storage::ImageStore;
use crate::utils::http::fetch_page;

/// led-modules.ru: home page → catalog categories → products.
pub struct LedModulesScraper {
    config: Arc<Config>,
}

impl LedModulesScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    async fn scrape_category(
        &self,
        client: &Client,
        images: &ImageStore,
        url: &Url,
        item_slugs: &mut SlugRegistry,
    ) -> Option<Category> {
        let site_config = self.site_config();

        let html = match fetch_page(client, url.as_str(), &self.config.page_fetch()).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Could not fetch category page {}: {}", url, e);
                return None;
            }
        };

        let page = parse_category_page(&html, url, site_config.max_products);
        info!(
            "Category \"{}\": {} product links",
            page.name,
            page.product_links.len()
        );

        let mut items = Vec::new();
        for product_url in &page.product_links {
            if let Some(mut item) =
                scrape_product(&self.config, client, images, product_url, site_config.max_images).await
            {
                // Published slugs are unique across the whole document: a repeated
                // title gets `-2`, `-3`, ... while image names keep the plain slug.
                item.slug = item_slugs.claim(&item.slug);
                items.push(item);
            }
        }

        Some(Category {
            slug: slugify(&page.name),
            name: page.name,
            source_url: url.to_string(),
            items,
        })
    }
}

#[async_trait]
impl VendorScraper for LedModulesScraper {
    async fn scrape(&self, client: &Client, images: &ImageStore) -> Result<CatalogDocument> {
        let site_config = self.site_config();
        info!("Scraping {}...", site_config.title);

        let base = parse_base_url(&site_config.base_url)?;
        let mut catalog = LedModulesCatalog::empty(&site_config.title, &site_config.base_url);

        let html = match fetch_page(client, base.as_str(), &self.config.page_fetch()).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Could not fetch {} home page: {}", site_config.title, e);
                return Ok(catalog.into());
            }
        };

        // Parse synchronously; the document must not live across await points.
        let home = parse_led_modules_home(&html, &base, site_config.max_category_links);
        catalog.contacts = home.contacts;
        info!("Found {} category links on {}", home.category_links.len(), site_config.title);

        let mut category_slugs = SlugRegistry::default();
        let mut item_slugs = SlugRegistry::default();

        for category_url in &home.category_links {
            let Some(mut category) = self
                .scrape_category(client, images, category_url, &mut item_slugs)
                .await
            else {
                continue;
            };

            if category.items.is_empty() {
                info!("Dropping empty category {}", category_url);
                continue;
            }

            // Suffixed like item slugs; only kept categories claim one.
            category.slug = category_slugs.claim(&category.slug);
            catalog.categories.push(category);
        }

        Ok(catalog.into())
    }

    fn empty_document(&self) -> CatalogDocument {
        let site_config = self.site_config();
        LedModulesCatalog::empty(&site_config.title, &site_config.base_url).into()
    }

    fn site_config(&self) -> &SiteConfig {
        &self.config.sites.led_modules
    }

    fn site(&self) -> Site {
        Site::LedModules
    }
}
