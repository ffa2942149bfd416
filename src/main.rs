use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use led_catalog_scraper::models::Site;
use led_catalog_scraper::{run, Config};

#[derive(Parser, Debug)]
#[command(name = "led-catalog-scraper", about = "Scrape LED vendor catalogs into JSON content")]
struct Cli {
    /// TOML config file (default: ./catalog-scraper.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the JSON documents
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Directory for downloaded images
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Scrape only these sites (repeatable); the manifest still lists all
    #[arg(long, value_enum)]
    only: Vec<Site>,

    /// Log as JSON lines
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("led_catalog_scraper=info"))?;
    if cli.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.content_dir {
        config.output.content_dir = dir;
    }
    if let Some(dir) = cli.assets_dir {
        config.output.assets_dir = dir;
    }

    let summary = run(Arc::new(config), &cli.only).await?;

    for document in &summary.documents {
        info!(
            "{}: {} items -> {}",
            document.site,
            document.item_count,
            document.path.display()
        );
    }
    info!("Manifest -> {}", summary.manifest_path.display());
    info!("Scraping complete");

    Ok(())
}
