use std::time::Duration;

use super::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;

const USER_AGENT: &str = concat!("terra_health/", env!("CARGO_PKG_VERSION"));

/// Plain `reqwest` client with a bounded per-request timeout.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build reqwest client")?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
