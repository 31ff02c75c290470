use crate::collector::Collector;
use crate::config::ClientConfig;
use crate::decode::decode;
use crate::error::FetchError;
use crate::model::{ItemDetail, ItemGraph, ItemId};
use crate::transport::{get_within, ReqwestTransport, Transport};
use crate::uri::{Endpoints, FetchTarget};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Grand Exchange client.
///
/// Single-item calls are strict and return any failure to the caller. Batch calls are
/// best-effort: they return whatever records could be fetched and decoded, in no
/// particular order, and drop the rest.
pub struct ExchangeClient<T = ReqwestTransport> {
    transport: Arc<T>,
    endpoints: Endpoints,
    collector: Collector<T>,
    request_timeout: Duration,
}

impl ExchangeClient<ReqwestTransport> {
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        Ok(Self::with_transport(config, ReqwestTransport::new(config)?))
    }
}

impl<T: Transport> ExchangeClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        let transport = Arc::new(transport);
        Self {
            collector: Collector::new(Arc::clone(&transport), config),
            endpoints: Endpoints::from_config(config),
            request_timeout: config.request_timeout,
            transport,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The underlying collector, for callers that want per-target outcomes.
    pub fn collector(&self) -> &Collector<T> {
        &self.collector
    }

    /// Price, trend and descriptive info for one item.
    pub async fn fetch_item(&self, id: ItemId) -> Result<ItemDetail, FetchError> {
        self.fetch_one(&self.endpoints.detail_uri(id)).await
    }

    /// Daily and average price graph for the previous 180 days of one item.
    pub async fn fetch_graph(&self, id: ItemId) -> Result<ItemGraph, FetchError> {
        self.fetch_one(&self.endpoints.graph_uri(id)).await
    }

    pub async fn batch_fetch_items(&self, ids: &[ItemId]) -> Vec<ItemDetail> {
        self.batch_fetch(self.endpoints.detail_targets(ids), "item")
            .await
    }

    pub async fn batch_fetch_graphs(&self, ids: &[ItemId]) -> Vec<ItemGraph> {
        self.batch_fetch(self.endpoints.graph_targets(ids), "graph")
            .await
    }

    async fn fetch_one<R: DeserializeOwned>(&self, uri: &str) -> Result<R, FetchError> {
        let body = get_within(self.transport.as_ref(), uri, self.request_timeout).await?;
        decode(&body)
    }

    async fn batch_fetch<R: DeserializeOwned>(
        &self,
        targets: Vec<FetchTarget>,
        what: &str,
    ) -> Vec<R> {
        let requested = targets.len();
        let outcomes = self.collector.collect(targets).await;

        let mut records = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            let Ok(body) = outcome.result else {
                continue;
            };
            match decode::<R>(&body) {
                Ok(record) => records.push(record),
                Err(e) => debug!("skipping {what} from {}: {e}", outcome.target.uri()),
            }
        }

        info!(
            "{what} batch: {} of {requested} fetched",
            records.len()
        );
        records
    }
}
