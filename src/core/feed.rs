//! Price feed abstraction

use super::error::SwapError;
use async_trait::async_trait;
use serde_json::Value;

/// A source of raw price list payloads.
///
/// Implementations perform exactly one outbound read per call and hand back
/// the decoded JSON document untouched; shape validation belongs to the
/// catalog.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch(&self) -> Result<Value, SwapError>;
}
