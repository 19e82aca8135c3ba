// src/fetch/mod.rs
use reqwest::{header, Client, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, ScrapeError};

pub mod download;
pub mod listing;

pub use download::fetch_csv;
pub use listing::{list_source_files, SourceFile};

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

const USER_AGENT: &str = concat!("casescraper/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by the lister and the fetcher.
pub fn build_client(cfg: &Config) -> Result<Client> {
    Client::builder()
        .timeout(cfg.timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|source| ScrapeError::Network {
            url: cfg.api_url.clone(),
            source,
        })
}

/// Who a request goes to. Only the GitHub API gets the API media type and
/// the token; raw downloads go out bare.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Target<'a> {
    Api { token: Option<&'a str> },
    Raw,
}

/// GET `url`, retrying transport failures. A non-2xx answer is returned as
/// `ScrapeError::Status` straight away.
pub(crate) async fn get_with_retry(
    client: &Client,
    url: &str,
    target: Target<'_>,
) -> Result<Response> {
    let mut attempt = 0;
    loop {
        attempt += 1;

        let mut req = client.get(url);
        if let Target::Api { token } = target {
            req = req.header(header::ACCEPT, "application/vnd.github.v3+json");
            if let Some(token) = token {
                req = req.bearer_auth(token);
            }
        }

        match req.send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!(url, attempt, "ok");
                return Ok(resp);
            }
            Ok(resp) => {
                return Err(ScrapeError::Status {
                    url: url.to_string(),
                    status: resp.status(),
                })
            }
            Err(e) if attempt < MAX_RETRIES => {
                warn!(url, attempt, error = %e, "request failed, retrying");
                sleep(RETRY_DELAY).await;
            }
            Err(source) => {
                return Err(ScrapeError::Network {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }
}

/// Reads the body as text, mapping failures to `ScrapeError::Network`.
pub(crate) async fn body_text(resp: Response, url: &str) -> Result<String> {
    resp.text().await.map_err(|source| ScrapeError::Network {
        url: url.to_string(),
        source,
    })
}
