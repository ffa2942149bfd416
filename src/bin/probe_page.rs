//! Fetch one page and report what the extraction rules see on it.
//!
//! Useful when a vendor changes its markup and a run suddenly comes back empty.

use anyhow::{Context, Result};
use clap::Parser;
use scraper::Html;
use std::fs;
use std::path::PathBuf;
use url::Url;

use led_catalog_scraper::parsers::{
    category_links, extract_advantages, extract_contacts, parse_product_page, product_links,
    LinkRule, MAX_ADVANTAGES,
};
use led_catalog_scraper::utils::http::{create_client, fetch_page};
use led_catalog_scraper::Config;

#[derive(Parser, Debug)]
#[command(name = "probe-page", about = "Show how catalog extraction reads a page")]
struct Args {
    url: String,

    /// Save the fetched HTML here
    #[arg(long)]
    save: Option<PathBuf>,

    #[arg(long, default_value_t = 8)]
    max_images: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(None)?;
    let client = create_client(&config)?;
    let url = Url::parse(&args.url).with_context(|| format!("Invalid URL {}", args.url))?;

    println!("Fetching {}...", url);
    let html = fetch_page(&client, url.as_str(), &config.page_fetch()).await?;
    if let Some(path) = &args.save {
        fs::write(path, &html)?;
        println!("Saved HTML to {}", path.display());
    }

    let document = Html::parse_document(&html);
    let contacts = extract_contacts(&document);
    println!("Phones: {:?}", contacts.phones.unwrap_or_default());
    println!("Emails: {:?}", contacts.emails.unwrap_or_default());
    println!(
        "Catalog links: {}",
        category_links(&document, &url, usize::MAX).len()
    );

    for (label, rule) in [
        ("LED Modules product links", LinkRule::LedModulesProduct),
        ("Sapphire product links", LinkRule::SapphireProduct),
    ] {
        let links = product_links(&document, &url, rule, usize::MAX);
        println!("{}: {}", label, links.len());
        for link in links.iter().take(5) {
            println!("  {}", link);
        }
    }

    println!(
        "Advantages: {}",
        extract_advantages(&document, MAX_ADVANTAGES).len()
    );

    let page = parse_product_page(&html, &url, args.max_images);
    println!("Title: {}", page.title);
    println!("Description: {} chars", page.description.chars().count());
    println!("Spec rows: {}", page.specs.len());
    for (label, value) in page.specs.iter() {
        println!("  {}: {}", label, value);
    }
    println!("Images: {}", page.image_urls.len());

    Ok(())
}
