use crate::core::error::SwapError;
use crate::core::feed::PriceFeed;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Reads the price list from a local JSON file, for offline use.
pub struct FilePriceFeed {
    path: PathBuf,
}

impl FilePriceFeed {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PriceFeed for FilePriceFeed {
    async fn fetch(&self) -> Result<Value, SwapError> {
        debug!("Reading price list from {}", self.path.display());

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SwapError::FeedUnavailable {
                message: format!("Failed to read {}: {}", self.path.display(), e),
            })?;

        serde_json::from_str(&text).map_err(|e| SwapError::MalformedFeed {
            message: format!("Failed to parse {}: {}", self.path.display(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"currency": "ATOM", "price": 7.18}}]"#).unwrap();

        let payload = FilePriceFeed::new(file.path()).fetch().await.unwrap();

        assert_eq!(payload[0]["currency"], "ATOM");
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = FilePriceFeed::new(dir.path().join("prices.json")).fetch().await;
        assert!(matches!(result, Err(SwapError::FeedUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_garbage_file_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "currency,price\nETH,1645").unwrap();

        let result = FilePriceFeed::new(file.path()).fetch().await;

        assert!(matches!(result, Err(SwapError::MalformedFeed { .. })));
    }
}
