// src/fetch/listing.rs
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::fetch::{body_text, get_with_retry, Target};
use crate::process::date_parser::parse_report_date;

/// One day's daily report in the upstream repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub date: NaiveDate,
    pub name: String,
    pub url: String,
}

/// The contents API returns at most this many entries per directory and
/// silently drops the rest (alphabetically last, so `12-xx-yyyy.csv`).
pub const CONTENTS_API_LIMIT: usize = 1000;

/// True when a listing of `entries` items has probably been cut off.
pub fn listing_truncated(entries: usize) -> bool {
    entries >= CONTENTS_API_LIMIT
}

/// Entry of the GitHub contents API directory response.
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

/// List the daily report files, oldest first, inside the configured date
/// bounds.
#[tracing::instrument(level = "info", skip_all, fields(url = %cfg.api_url))]
pub async fn list_source_files(client: &Client, cfg: &Config) -> Result<Vec<SourceFile>> {
    let target = Target::Api {
        token: cfg.github_token.as_deref(),
    };
    let resp = get_with_retry(client, &cfg.api_url, target).await?;
    let body = body_text(resp, &cfg.api_url).await?;
    let entries: Vec<ContentEntry> =
        serde_json::from_str(&body).map_err(|source| ScrapeError::Listing {
            url: cfg.api_url.clone(),
            source,
        })?;
    info!(entries = entries.len(), "directory listing");
    if listing_truncated(entries.len()) {
        warn!(
            entries = entries.len(),
            "listing hit the contents API cap; later files in the directory are missing"
        );
    }

    let base = Url::parse(&cfg.raw_base_url).ok();
    let mut files: Vec<SourceFile> = entries
        .into_iter()
        .filter(|e| e.kind == "file")
        .filter_map(|e| {
            let Some(date) = parse_report_date(&e.name) else {
                debug!(name = %e.name, "not a daily report, skipping");
                return None;
            };
            let url = e.download_url.clone().or_else(|| {
                base.as_ref()
                    .and_then(|b| b.join(&e.name).ok())
                    .map(|u| u.to_string())
            })?;
            Some(SourceFile {
                date,
                name: e.name,
                url,
            })
        })
        .filter(|f| cfg.in_range(f.date))
        .collect();

    files.sort_by_key(|f| f.date);

    if files.is_empty() {
        return Err(ScrapeError::NotFound(cfg.api_url.clone()));
    }
    info!(files = files.len(), "source files selected");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::build_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve_listing(body: serde_json::Value) -> (MockServer, Config) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contents/daily"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        let cfg = Config {
            api_url: format!("{}/contents/daily", server.uri()),
            raw_base_url: format!("{}/raw/", server.uri()),
            ..Config::default()
        };
        (server, cfg)
    }

    #[tokio::test]
    async fn lists_reports_in_date_order() {
        let (_server, cfg) = serve_listing(json!([
            {"name": ".gitignore", "type": "file", "download_url": "http://x/.gitignore"},
            {"name": "01-02-2021.csv", "type": "file", "download_url": "http://x/01-02-2021.csv"},
            {"name": "archive", "type": "dir", "download_url": null},
            {"name": "12-31-2020.csv", "type": "file", "download_url": "http://x/12-31-2020.csv"},
            {"name": "README.md", "type": "file", "download_url": "http://x/README.md"},
        ]))
        .await;
        let client = build_client(&cfg).unwrap();

        let files = list_source_files(&client, &cfg).await.unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["12-31-2020.csv", "01-02-2021.csv"]);
        assert_eq!(files[0].url, "http://x/12-31-2020.csv");
    }

    #[tokio::test]
    async fn missing_download_url_falls_back_to_raw_base() {
        let (server, cfg) = serve_listing(json!([
            {"name": "03-01-2021.csv", "type": "file"},
        ]))
        .await;
        let client = build_client(&cfg).unwrap();

        let files = list_source_files(&client, &cfg).await.unwrap();
        assert_eq!(files[0].url, format!("{}/raw/03-01-2021.csv", server.uri()));
    }

    #[tokio::test]
    async fn date_bounds_filter_and_empty_range_is_not_found() {
        let (_server, mut cfg) = serve_listing(json!([
            {"name": "01-01-2021.csv", "type": "file", "download_url": "http://x/a"},
            {"name": "01-02-2021.csv", "type": "file", "download_url": "http://x/b"},
            {"name": "01-03-2021.csv", "type": "file", "download_url": "http://x/c"},
        ]))
        .await;
        let client = build_client(&cfg).unwrap();

        cfg.from = NaiveDate::from_ymd_opt(2021, 1, 2);
        let files = list_source_files(&client, &cfg).await.unwrap();
        assert_eq!(files.len(), 2);

        cfg.from = NaiveDate::from_ymd_opt(2022, 1, 1);
        let err = list_source_files(&client, &cfg).await.unwrap_err();
        assert!(matches!(err, ScrapeError::NotFound(_)));
    }

    #[tokio::test]
    async fn garbage_listing_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"message\":\"nope\"}"))
            .mount(&server)
            .await;
        let cfg = Config {
            api_url: server.uri(),
            ..Config::default()
        };
        let client = build_client(&cfg).unwrap();

        let err = list_source_files(&client, &cfg).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Listing { .. }));
    }

    #[test]
    fn cap_detection() {
        assert!(!listing_truncated(999));
        assert!(listing_truncated(CONTENTS_API_LIMIT));
    }

    #[tokio::test]
    async fn capped_listing_still_lists() {
        let first = NaiveDate::from_ymd_opt(2020, 1, 22).unwrap();
        let entries: Vec<_> = (0..CONTENTS_API_LIMIT as i64)
            .map(|i| {
                let name = format!("{}.csv", (first + chrono::Duration::days(i)).format("%m-%d-%Y"));
                json!({"name": name, "type": "file", "download_url": format!("http://x/{}", name)})
            })
            .collect();
        let (_server, cfg) = serve_listing(json!(entries)).await;
        let client = build_client(&cfg).unwrap();

        let files = list_source_files(&client, &cfg).await.unwrap();
        assert_eq!(files.len(), CONTENTS_API_LIMIT);
        assert_eq!(files[0].date, first);
    }
}
