pub mod file_feed;
pub mod http_feed;

pub use file_feed::FilePriceFeed;
pub use http_feed::HttpPriceFeed;
