//! In-memory snapshot of token prices for a session.

use super::error::SwapError;
use super::feed::PriceFeed;
use super::token::Token;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, instrument, warn};

/// One element of the feed payload, before validation.
#[derive(Debug, Deserialize)]
struct FeedRecord {
    currency: String,
    price: f64,
    #[serde(default)]
    date: Option<Value>,
}

/// Holds the authoritative price list and answers point lookups by id.
///
/// The catalog starts empty and is filled by [`PriceCatalog::load`]. A load
/// either swaps in a complete new snapshot or leaves the catalog empty; there
/// is no merging with a previous snapshot.
#[derive(Debug, Clone)]
pub struct PriceCatalog {
    icon_template: String,
    tokens: HashMap<String, Token>,
    fetched_at: Option<DateTime<Utc>>,
}

impl PriceCatalog {
    pub fn new(icon_template: &str) -> Self {
        Self {
            icon_template: icon_template.to_string(),
            tokens: HashMap::new(),
            fetched_at: None,
        }
    }

    /// Builds a catalog directly from `(id, price)` pairs, applying the same
    /// filtering as a feed load.
    pub fn from_prices<'a, I>(icon_template: &str, prices: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut catalog = Self::new(icon_template);
        for (id, price) in prices {
            if let Some(token) = catalog.validate(id, price) {
                catalog.tokens.entry(token.id.clone()).or_insert(token);
            }
        }
        catalog
    }

    /// Fetches the feed once and replaces the catalog contents.
    #[instrument(name = "CatalogLoad", skip_all)]
    pub async fn load(&mut self, feed: &dyn PriceFeed) -> Result<usize, SwapError> {
        let outcome = match feed.fetch().await {
            Ok(payload) => self.parse(&payload),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(tokens) => {
                self.tokens = tokens;
                self.fetched_at = Some(Utc::now());
                debug!(count = self.tokens.len(), "Catalog loaded");
                Ok(self.tokens.len())
            }
            Err(e) => {
                self.tokens.clear();
                self.fetched_at = None;
                warn!(error = %e, "Catalog load failed");
                Err(e)
            }
        }
    }

    pub fn lookup_price(&self, id: &str) -> Option<f64> {
        self.tokens.get(id).map(|t| t.price)
    }

    pub fn get(&self, id: &str) -> Option<&Token> {
        self.tokens.get(id)
    }

    /// Iterates over every known token. Order is unspecified; call again to
    /// restart.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> + Clone + '_ {
        self.tokens.values()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    fn parse(&self, payload: &Value) -> Result<HashMap<String, Token>, SwapError> {
        let items = payload.as_array().ok_or_else(|| SwapError::MalformedFeed {
            message: format!("expected a list of prices, got {}", json_kind(payload)),
        })?;

        let mut tokens: HashMap<String, Token> = HashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let record: FeedRecord = match serde_json::from_value(item.clone()) {
                Ok(record) => record,
                Err(e) => {
                    warn!(index, error = %e, "Skipping unreadable feed record");
                    continue;
                }
            };

            let Some(mut token) = self.validate(&record.currency, record.price) else {
                continue;
            };
            token.updated_at = record
                .date
                .as_ref()
                .and_then(Value::as_str)
                .and_then(parse_feed_date);

            match tokens.entry(token.id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(token);
                }
                Entry::Occupied(mut slot) => {
                    // Newer quotes replace older ones; undated or equal dates keep the first.
                    if let (Some(new), Some(old)) = (token.updated_at, slot.get().updated_at) {
                        if new > old {
                            debug!(id = %token.id, "Replacing older quote");
                            slot.insert(token);
                        }
                    }
                }
            }
        }

        Ok(tokens)
    }

    fn validate(&self, id: &str, price: f64) -> Option<Token> {
        let id = id.trim();
        if id.is_empty() {
            warn!("Skipping feed record without currency");
            return None;
        }
        if !price.is_finite() || price <= 0.0 {
            warn!(id, price, "Skipping feed record with unusable price");
            return None;
        }
        Some(Token::new(id, price, &self.icon_template))
    }
}

fn parse_feed_date(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
