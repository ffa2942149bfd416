use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Site, SpecTable};

/// Phone numbers and e-mail addresses linked from a vendor home page.
///
/// Both lists are absent (an empty JSON object) when the home page could not
/// be fetched, and present, possibly empty, otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub specs: SpecTable,
    /// Local asset paths, e.g. `/assets/p10-outdoor-1a2b3c4d5e.jpg`.
    pub images: Vec<String>,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub source_url: String,
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedModulesCatalog {
    pub title: String,
    pub source_url: String,
    pub contacts: Contacts,
    pub categories: Vec<Category>,
}

impl LedModulesCatalog {
    pub fn empty(title: &str, source_url: &str) -> Self {
        Self {
            title: title.to_string(),
            source_url: source_url.to_string(),
            contacts: Contacts::default(),
            categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SapphireCatalog {
    pub title: String,
    pub source_url: String,
    pub advantages: Vec<String>,
    pub series: Vec<CatalogItem>,
    pub contacts: Contacts,
}

impl SapphireCatalog {
    pub fn empty(title: &str, source_url: &str) -> Self {
        Self {
            title: title.to_string(),
            source_url: source_url.to_string(),
            advantages: Vec::new(),
            series: Vec::new(),
            contacts: Contacts::default(),
        }
    }
}

/// One vendor's output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogDocument {
    LedModules(LedModulesCatalog),
    Sapphire(SapphireCatalog),
}

impl CatalogDocument {
    pub fn site(&self) -> Site {
        match self {
            CatalogDocument::LedModules(_) => Site::LedModules,
            CatalogDocument::Sapphire(_) => Site::Sapphire,
        }
    }

    /// Number of product records across the document.
    pub fn item_count(&self) -> usize {
        match self {
            CatalogDocument::LedModules(catalog) => {
                catalog.categories.iter().map(|c| c.items.len()).sum()
            }
            CatalogDocument::Sapphire(catalog) => catalog.series.len(),
        }
    }
}

impl From<LedModulesCatalog> for CatalogDocument {
    fn from(catalog: LedModulesCatalog) -> Self {
        CatalogDocument::LedModules(catalog)
    }
}

impl From<SapphireCatalog> for CatalogDocument {
    fn from(catalog: SapphireCatalog) -> Self {
        CatalogDocument::Sapphire(catalog)
    }
}

/// Provenance record written next to the vendor documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesManifest {
    pub updated_at: String,
    pub source_urls: Vec<String>,
    pub source_url: String,
}

impl SourcesManifest {
    pub fn new(source_urls: Vec<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            updated_at: updated_at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            source_url: source_urls.join(" & "),
            source_urls,
        }
    }
}
