use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::Site;
use crate::utils::http::FetchOptions;

/// Looked up in the working directory when no `--config` path is given.
pub const DEFAULT_CONFIG_FILE: &str = "catalog-scraper";
pub const ENV_PREFIX: &str = "CATALOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub user_agent: String,
    pub page_timeout_seconds: u64,
    pub image_timeout_seconds: u64,
    /// Total tries per request; 1 means no retry.
    pub max_attempts: u32,
    /// Pause before each product page request.
    pub request_delay_millis: u64,
    pub manifest_file: String,
    pub output: OutputConfig,
    pub sites: SitesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub content_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub assets_url_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesConfig {
    pub led_modules: SiteConfig,
    pub sapphire: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub base_url: String,
    pub output_file: String,
    pub max_category_links: usize,
    pub max_products: usize,
    pub max_images: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; SapMigrator/1.0)".to_string(),
            page_timeout_seconds: 20,
            image_timeout_seconds: 25,
            max_attempts: 1,
            request_delay_millis: 0,
            manifest_file: "sources.json".to_string(),
            output: OutputConfig {
                content_dir: PathBuf::from("content"),
                assets_dir: PathBuf::from("public/assets"),
                assets_url_prefix: "/assets".to_string(),
            },
            sites: SitesConfig {
                led_modules: SiteConfig {
                    title: "LED Modules".to_string(),
                    base_url: "https://led-modules.ru/".to_string(),
                    output_file: "modules.json".to_string(),
                    max_category_links: 15,
                    max_products: 40,
                    max_images: 8,
                },
                sapphire: SiteConfig {
                    title: "Sapphire LED".to_string(),
                    base_url: "https://sapphire-led.com/".to_string(),
                    output_file: "sapphire.json".to_string(),
                    max_category_links: 0,
                    max_products: 30,
                    max_images: 6,
                },
            },
        }
    }
}

impl Config {
    /// Layers built-in defaults, an optional TOML file and `CATALOG_*` env vars.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_layered(path, DEFAULT_CONFIG_FILE, environment())
    }

    fn load_layered(
        path: Option<&Path>,
        default_file: &str,
        env: config::Environment,
    ) -> Result<Self> {
        let defaults = config::Config::try_from(&Config::default())
            .context("Failed to serialize default configuration")?;

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(default_file).required(false),
        };

        config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn page_fetch(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.page_timeout_seconds),
            max_attempts: self.max_attempts,
        }
    }

    pub fn image_fetch(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.image_timeout_seconds),
            max_attempts: self.max_attempts,
        }
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_millis)
    }
}

/// `CATALOG_MAX_ATTEMPTS`, `CATALOG_OUTPUT__CONTENT_DIR`, ...
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

impl SitesConfig {
    pub fn get(&self, site: Site) -> &SiteConfig {
        match site {
            Site::LedModules => &self.led_modules,
            Site::Sapphire => &self.sapphire,
        }
    }

    /// Every configured site, in manifest order.
    pub fn all(&self) -> [(Site, &SiteConfig); 2] {
        [
            (Site::LedModules, &self.led_modules),
            (Site::Sapphire, &self.sapphire),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
max_attempts = 3

[output]
content_dir = "out/content"

[sites.sapphire]
max_products = 5
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.output.content_dir, PathBuf::from("out/content"));
        assert_eq!(config.output.assets_dir, PathBuf::from("public/assets"));
        assert_eq!(config.sites.sapphire.max_products, 5);
        assert_eq!(config.sites.sapphire.max_images, 6);
        assert_eq!(config.sites.led_modules.max_category_links, 15);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    fn env_vars(vars: &[(&str, &str)]) -> config::Environment {
        environment().source(Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn env_vars_override_nested_and_top_level_keys() {
        let dir = tempfile::tempdir().unwrap();
        let default_file = dir.path().join(DEFAULT_CONFIG_FILE);

        let config = Config::load_layered(
            None,
            default_file.to_str().unwrap(),
            env_vars(&[
                ("CATALOG_OUTPUT__CONTENT_DIR", "envdir"),
                ("CATALOG_MAX_ATTEMPTS", "4"),
                ("OTHER_MAX_ATTEMPTS", "9"),
            ]),
        )
        .unwrap();

        assert_eq!(config.output.content_dir, PathBuf::from("envdir"));
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.output.assets_dir, PathBuf::from("public/assets"));
    }

    #[test]
    fn env_vars_beat_the_config_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "max_attempts = 3").unwrap();

        let config = Config::load_layered(
            Some(file.path()),
            DEFAULT_CONFIG_FILE,
            env_vars(&[("CATALOG_MAX_ATTEMPTS", "5")]),
        )
        .unwrap();

        assert_eq!(config.max_attempts, 5);
    }

    #[test]
    fn default_file_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let default_file = dir.path().join(DEFAULT_CONFIG_FILE);

        let config =
            Config::load_layered(None, default_file.to_str().unwrap(), env_vars(&[])).unwrap();
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.output.content_dir, PathBuf::from("content"));

        std::fs::write(
            dir.path().join(format!("{DEFAULT_CONFIG_FILE}.toml")),
            "request_delay_millis = 250\n[sites.led_modules]\nmax_images = 2\n",
        )
        .unwrap();

        let config =
            Config::load_layered(None, default_file.to_str().unwrap(), env_vars(&[])).unwrap();
        assert_eq!(config.request_delay(), Duration::from_millis(250));
        assert_eq!(config.sites.led_modules.max_images, 2);
        assert_eq!(config.sites.led_modules.max_products, 40);
    }

    #[test]
    fn sites_are_listed_in_manifest_order() {
        let config = Config::default();
        let urls: Vec<_> = config
            .sites
            .all()
            .iter()
            .map(|(_, site)| site.base_url.clone())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://led-modules.ru/".to_string(),
                "https://sapphire-led.com/".to_string()
            ]
        );
        assert_eq!(config.sites.get(Site::Sapphire).output_file, "sapphire.json");
    }
}
