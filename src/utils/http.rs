use anyhow::Result;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ScrapeError, ScrapeResult};

/// Per-request limits; pages and images use different timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_attempts: u32,
}

pub fn create_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

/// GET `url` until a 2xx arrives or `max_attempts` is used up.
///
/// Waits 2^n seconds between attempts.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    options: &FetchOptions,
) -> ScrapeResult<Response> {
    let max_attempts = options.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let error = match client.get(url).timeout(options.timeout).send().await {
            Ok(response) if response.status().is_success() => return Ok(response),
            Ok(response) => {
                let status = response.status();
                warn!("HTTP error {}: {}", status, url);
                ScrapeError::Status {
                    url: url.to_string(),
                    status,
                }
            }
            Err(e) => {
                warn!("Request failed for {}: {}", url, e);
                ScrapeError::Request {
                    url: url.to_string(),
                    source: e,
                }
            }
        };

        if attempt >= max_attempts {
            return Err(error);
        }

        let delay = Duration::from_secs(2u64.pow(attempt));
        attempt += 1;
        warn!("Retrying in {:?}... (attempt {}/{})", delay, attempt, max_attempts);
        sleep(delay).await;
    }
}

/// Body of an HTML page.
pub async fn fetch_page(client: &Client, url: &str, options: &FetchOptions) -> ScrapeResult<String> {
    let response = fetch_with_retry(client, url, options).await?;
    let body = response.text().await.map_err(|source| ScrapeError::Request {
        url: url.to_string(),
        source,
    })?;
    debug!("Fetched {} ({} bytes)", url, body.len());
    Ok(body)
}
