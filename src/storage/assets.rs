use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ScrapeError, ScrapeResult};
use crate::utils::http::{fetch_with_retry, FetchOptions};

const DEFAULT_EXTENSION: &str = ".jpg";
const HASH_CHARS: usize = 10;

/// Flat directory of downloaded images, one file per distinct source URL.
pub struct ImageStore {
    dir: PathBuf,
    url_prefix: String,
    fetch: FetchOptions,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: &str, fetch: FetchOptions) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            fetch,
        }
    }

    /// Download `url` unless a file for it already exists.
    ///
    /// Returns the public path of the stored file, or `None` on any failure.
    pub async fn store(&self, client: &Client, url: &str, prefix: &str) -> Option<String> {
        if url.is_empty() {
            return None;
        }

        match self.try_store(client, url, prefix).await {
            Ok(public_path) => Some(public_path),
            Err(e) => {
                warn!("Skipping image {}: {}", url, e);
                None
            }
        }
    }

    async fn try_store(&self, client: &Client, url: &str, prefix: &str) -> ScrapeResult<String> {
        let name = asset_file_name(url, prefix);
        let target = self.dir.join(&name);

        if tokio::fs::try_exists(&target).await? {
            debug!("Image already stored: {}", name);
        } else {
            let response = fetch_with_retry(client, url, &self.fetch).await?;
            let bytes = response.bytes().await.map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;
            tokio::fs::write(&target, &bytes).await?;
            debug!("Stored image {} ({} bytes)", name, bytes.len());
        }

        Ok(format!("{}/{}", self.url_prefix, name))
    }
}

/// `{prefix}-{md5(url)[..10]}{ext}`; the extension comes from the URL path and defaults to `.jpg`.
pub fn asset_file_name(url: &str, prefix: &str) -> String {
    let extension = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            Path::new(parsed.path())
                .extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext| !ext.is_empty())
                .map(|ext| format!(".{ext}"))
        })
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    // Callers pass `Url::as_str`, so non-ASCII paths are hashed percent-encoded.
    let digest = format!("{:x}", md5::compute(url.as_bytes()));
    format!("{}-{}{}", prefix, &digest[..HASH_CHARS], extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetch() -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(5),
            max_attempts: 1,
        }
    }

    #[test]
    fn file_name_uses_url_hash_and_extension() {
        let url = "https://led-modules.ru/upload/p10.png";
        let digest = format!("{:x}", md5::compute(url));
        assert_eq!(
            asset_file_name(url, "модуль-p10"),
            format!("модуль-p10-{}.png", &digest[..10])
        );
    }

    #[test]
    fn non_ascii_urls_are_hashed_percent_encoded() {
        let resolved = Url::parse("https://led-modules.ru/")
            .unwrap()
            .join("/upload/модуль p10.jpg")
            .unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://led-modules.ru/upload/%D0%BC%D0%BE%D0%B4%D1%83%D0%BB%D1%8C%20p10.jpg"
        );

        let encoded = format!("{:x}", md5::compute(resolved.as_str()));
        let raw = format!("{:x}", md5::compute("https://led-modules.ru/upload/модуль p10.jpg"));
        let name = asset_file_name(resolved.as_str(), "p10");

        assert_eq!(name, format!("p10-{}.jpg", &encoded[..10]));
        assert_ne!(name, format!("p10-{}.jpg", &raw[..10]));
    }

    #[test]
    fn file_name_defaults_to_jpg() {
        assert!(asset_file_name("https://sapphire-led.com/image?id=4", "scih1").ends_with(".jpg"));
        assert!(asset_file_name("https://sapphire-led.com/img/", "scih1").ends_with(".jpg"));
        assert!(asset_file_name("https://sapphire-led.com/img/photo.", "scih1").ends_with(".jpg"));
        // query strings are not part of the path
        assert!(asset_file_name("https://sapphire-led.com/a.webp?v=2", "scih1").ends_with(".webp"));
    }

    #[tokio::test]
    async fn downloads_once_per_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/upload/p10.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png-bytes".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path(), "/assets/", fetch());
        let client = Client::new();
        let url = format!("{}/upload/p10.png", server.uri());

        let first = store.store(&client, &url, "p10").await.unwrap();
        let second = store.store(&client, &url, "p10").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, format!("/assets/{}", asset_file_name(&url, "p10")));
        let saved = std::fs::read(dir.path().join(asset_file_name(&url, "p10"))).unwrap();
        assert_eq!(saved, b"png-bytes");
    }

    #[tokio::test]
    async fn failures_yield_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path(), "/assets", fetch());
        let client = Client::new();

        assert_eq!(store.store(&client, "", "p10").await, None);
        assert_eq!(
            store
                .store(&client, &format!("{}/broken.jpg", server.uri()), "p10")
                .await,
            None
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
