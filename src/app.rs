use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::models::{Site, SourcesManifest};
use crate::scrapers::build_scrapers;
use crate::storage::{ContentStore, ImageStore};
use crate::utils::http::create_client;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub site: Site,
    pub path: PathBuf,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub documents: Vec<DocumentSummary>,
    pub manifest_path: PathBuf,
}

/// One scrape pass: crawl the selected vendors, write their documents, then the manifest.
///
/// Every selected vendor gets an output file, even when its site was unreachable.
/// The manifest always lists every configured site.
pub async fn run(config: Arc<Config>, only: &[Site]) -> Result<RunSummary> {
    let content = ContentStore::new(&config.output.content_dir, &config.output.assets_dir);
    content
        .prepare()
        .await
        .context("Failed to create output directories")?;

    let client = create_client(&config)?;
    let images = ImageStore::new(
        &config.output.assets_dir,
        &config.output.assets_url_prefix,
        config.image_fetch(),
    );

    let scrapers = build_scrapers(config.clone(), only);
    info!(
        "Scraping {} site(s) into {}",
        scrapers.len(),
        content.content_dir().display()
    );

    let results = join_all(
        scrapers
            .iter()
            .map(|scraper| scraper.scrape(&client, &images)),
    )
    .await;

    let mut documents = Vec::new();
    for (scraper, result) in scrapers.iter().zip(results) {
        let document = match result {
            Ok(document) => document,
            Err(e) => {
                error!("Scraper for {} failed: {:#}", scraper.site(), e);
                scraper.empty_document()
            }
        };

        let file_name = &config.sites.get(scraper.site()).output_file;
        let path = content
            .write_json(file_name, &document)
            .await
            .with_context(|| format!("Failed to write {}", file_name))?;

        documents.push(DocumentSummary {
            site: document.site(),
            path,
            item_count: document.item_count(),
        });
    }

    let source_urls = config
        .sites
        .all()
        .iter()
        .map(|(_, site)| site.base_url.clone())
        .collect();
    let manifest = SourcesManifest::new(source_urls, Utc::now());
    let manifest_path = content
        .write_json(&config.manifest_file, &manifest)
        .await
        .with_context(|| format!("Failed to write {}", config.manifest_file))?;

    Ok(RunSummary {
        documents,
        manifest_path,
    })
}
