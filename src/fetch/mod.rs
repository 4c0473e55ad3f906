mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result, bail};
use reqwest::Url;
use tracing::debug;

/// GETs `url` and decodes the body as JSON.
///
/// Providers report bad requests as a JSON error object with a 4xx status,
/// so a non-success response is still returned when its body is JSON.
pub async fn fetch_json<C>(client: &C, url: Url) -> Result<serde_json::Value>
where
    C: HttpClient + ?Sized,
{
    let req = reqwest::Request::new(reqwest::Method::GET, url.clone());
    let host = url.host_str().unwrap_or("provider");

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("Request to {host} failed"))?;
    let status = resp.status();
    let body = resp.bytes().await?;
    debug!(%status, bytes = body.len(), "Provider response received");

    match serde_json::from_slice(&body) {
        Ok(json) => Ok(json),
        Err(e) if status.is_success() => {
            Err(e).with_context(|| format!("Provider returned invalid JSON from {url}"))
        }
        Err(_) => bail!(
            "Provider returned status {}: {}",
            status,
            String::from_utf8_lossy(&body)
        ),
    }
}
