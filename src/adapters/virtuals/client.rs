//! Virtuals.io listing page fetcher.
//!
//! Plain HTTP retrieval of the listing page with settled-content detection:
//! the page renders its token cards asynchronously, so a fresh response may
//! only contain the loading skeleton. Each attempt checks for agent cards and
//! the fetch retries on a fixed delay until they appear or the attempt budget
//! runs out.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::ports::page_source::{PageSource, SourceError};

/// Marker that distinguishes settled content from the loading skeleton.
const AGENT_CARD_MARKER: &str = "/agents/";

/// Fetch settings for the listing page.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url: String,
    pub timeout: Duration,
    /// Re-fetch budget while waiting for cards to appear
    pub settle_attempts: u32,
    pub settle_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: "https://fun.virtuals.io".to_string(),
            timeout: Duration::from_secs(30),
            settle_attempts: 3,
            settle_delay: Duration::from_secs(5),
        }
    }
}

/// HTTP page source for the fun.virtuals.io listing.
pub struct VirtualsClient {
    client: Client,
    config: FetchConfig,
}

impl VirtualsClient {
    pub fn new(config: FetchConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn fetch_once(&self) -> Result<String, SourceError> {
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))
    }

    /// Heuristic settled check: the skeleton page carries no agent links.
    fn looks_settled(html: &str) -> bool {
        html.contains(AGENT_CARD_MARKER)
    }
}

#[async_trait]
impl PageSource for VirtualsClient {
    async fn fetch_settled(&self) -> Result<String, SourceError> {
        for attempt in 1..=self.config.settle_attempts {
            let html = self.fetch_once().await?;

            if Self::looks_settled(&html) {
                info!(attempt, "listing page settled");
                return Ok(html);
            }

            debug!(attempt, "no agent cards yet, waiting for page to settle");
            if attempt < self.config.settle_attempts {
                tokio::time::sleep(self.config.settle_delay).await;
            }
        }

        warn!(
            attempts = self.config.settle_attempts,
            "listing page never settled"
        );
        Err(SourceError::NotSettled {
            attempts: self.config.settle_attempts,
        })
    }
}
