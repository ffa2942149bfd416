//! Scrapes the led-modules.ru and sapphire-led.com catalogs into JSON content
//! documents, a provenance manifest and a flat directory of product images.
//!
//! Each run is a single fetch → parse → write pass. Unreachable pages and
//! images are logged and left out; the output files are always written.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod storage;
pub mod utils;

pub use app::{run, DocumentSummary, RunSummary};
pub use config::Config;
pub use error::{ScrapeError, ScrapeResult};
