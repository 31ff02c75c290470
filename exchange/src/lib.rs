//! Client for the Grand Exchange item database.
//!
//! Fetches item details and price graphs one at a time or in batches. Batches fan out
//! over a bounded pool of concurrent requests and return every record that could be
//! fetched and decoded.

mod client;
mod collector;
pub mod config;
mod decode;
mod error;
mod model;
mod transport;
mod uri;

#[cfg(test)]
mod testing;

pub use client::ExchangeClient;
pub use collector::{Collector, FetchOutcome};
pub use config::{Catalogue, ClientConfig, ClientConfigBuilder};
pub use decode::decode;
pub use error::{BoxError, FetchError, FetchErrorKind};
pub use model::{
    Item, ItemDetail, ItemGraph, ItemId, PriceChange, PriceCurrentDetail, PriceTodayDetail,
};
pub use transport::{ReqwestTransport, Transport};
pub use uri::{Endpoints, FetchTarget};
