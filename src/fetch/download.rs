use reqwest::Client;
use tracing::info;

use crate::error::Result;
use crate::fetch::{body_text, get_with_retry, SourceFile, Target};

/// Download the raw CSV text of one daily report.
#[tracing::instrument(level = "info", skip(client, file), fields(name = %file.name))]
pub async fn fetch_csv(client: &Client, file: &SourceFile) -> Result<String> {
    let resp = get_with_retry(client, &file.url, Target::Raw).await?;
    let text = body_text(resp, &file.url).await?;
    info!(bytes = text.len(), "downloaded");
    Ok(text)
}
