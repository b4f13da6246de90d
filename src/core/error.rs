//! Error taxonomy for catalog loading and conversions.

use thiserror::Error;

/// Errors surfaced by [`PriceCatalog`](super::catalog::PriceCatalog) and the
/// conversion engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwapError {
    /// The feed could not be reached or returned a failure status.
    #[error("Price feed unavailable: {message}")]
    FeedUnavailable {
        /// Transport error description.
        message: String,
    },

    /// The feed answered with something other than a list of prices.
    #[error("Malformed price feed: {message}")]
    MalformedFeed {
        /// What was wrong with the payload.
        message: String,
    },

    /// Missing token selection or an unusable amount.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Which input was rejected.
        message: String,
    },

    /// One or more selected tokens have no price in the catalog.
    #[error("No price found for token(s): {}", .ids.join(", "))]
    UnknownToken {
        /// Every identifier that could not be resolved.
        ids: Vec<String>,
    },

    /// The arithmetic produced a value that cannot be reported.
    #[error("Conversion failed: {message}")]
    Computation {
        /// Error message.
        message: String,
    },
}

impl SwapError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        SwapError::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn computation(message: impl Into<String>) -> Self {
        SwapError::Computation {
            message: message.into(),
        }
    }

    /// The single line shown to a user for each failure category.
    pub fn user_message(&self) -> String {
        match self {
            SwapError::FeedUnavailable { .. } => "Could not load prices from the feed.".to_string(),
            SwapError::MalformedFeed { .. } => "The price feed returned invalid data.".to_string(),
            SwapError::InvalidInput { .. } => {
                "Please select both tokens and enter a valid amount.".to_string()
            }
            SwapError::UnknownToken { ids } => {
                format!("No price found for token: {}.", ids.join(" or "))
            }
            SwapError::Computation { .. } => "Could not compute the swap amount.".to_string(),
        }
    }
}
