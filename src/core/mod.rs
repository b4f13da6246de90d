//! Core business logic abstractions

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod log;
pub mod series;
pub mod token;

// Re-export main types for cleaner imports
pub use catalog::PriceCatalog;
pub use engine::{Conversion, ConversionEngine, ConversionRequest, ConversionState, convert};
pub use error::SwapError;
pub use feed::PriceFeed;
pub use token::Token;
