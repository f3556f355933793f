use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::RATE_LIMIT_DELAY_MS;
use crate::errors::CoreError;

use super::traits::{HttpGateway, HttpReply, Pacer};

/// Production HTTP transport backed by reqwest.
pub struct ReqwestGateway {
    client: Client,
}

impl ReqwestGateway {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

impl Default for ReqwestGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn get(&self, url: &str) -> Result<HttpReply, CoreError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}

/// Production pacer: a fixed asynchronous sleep between API calls.
pub struct IntervalPacer {
    delay: Duration,
}

impl IntervalPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for IntervalPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(RATE_LIMIT_DELAY_MS))
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn pace(&self) {
        tokio::time::sleep(self.delay).await;
    }
}
