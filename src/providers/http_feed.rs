use crate::core::error::SwapError;
use crate::core::feed::PriceFeed;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("tokswap/", env!("CARGO_PKG_VERSION"));

/// Reads the price list with a single HTTP GET.
pub struct HttpPriceFeed {
    url: String,
    client: reqwest::Client,
}

impl HttpPriceFeed {
    pub fn new(url: &str) -> Result<Self, SwapError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SwapError::FeedUnavailable {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(HttpPriceFeed {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    #[instrument(name = "HttpFeedFetch", skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Value, SwapError> {
        debug!("Requesting price list from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SwapError::FeedUnavailable {
                message: format!("Request error: {} for URL: {}", e, self.url),
            })?;

        if !response.status().is_success() {
            return Err(SwapError::FeedUnavailable {
                message: format!("HTTP error: {} for URL: {}", response.status(), self.url),
            });
        }

        let text = response.text().await.map_err(|e| SwapError::FeedUnavailable {
            message: format!("Failed to read response body: {e}"),
        })?;

        serde_json::from_str(&text).map_err(|e| SwapError::MalformedFeed {
            message: format!("Failed to parse JSON response from {}: {}", self.url, e),
        })
    }
}
