// External API clients

pub mod price_feed;

pub use price_feed::{parse_price, FetchFailure, HttpPriceFeed, PriceSource};
