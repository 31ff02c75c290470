//! HTTP GET transport used by both the single-item and the batch paths.
//!
//! The [`Transport`] trait is the seam for injecting fakes; [`ReqwestTransport`] is the
//! real implementation.

use crate::config::ClientConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

/// Performs one GET and returns the full response body.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn get(&self, uri: &str) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed transport. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.request_timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        trace!("GET {uri}");

        let resp = self
            .client
            .get(uri)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::network(uri, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                uri: uri.to_string(),
                status: status.as_u16(),
            });
        }

        // `resp` is consumed here; the connection goes back to the pool or is closed on
        // every path, including a failed read.
        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::read(uri, e))?;

        Ok(body.to_vec())
    }
}

/// Run one GET bounded by `limit`.
pub(crate) async fn get_within<T>(
    transport: &T,
    uri: &str,
    limit: Duration,
) -> Result<Vec<u8>, FetchError>
where
    T: Transport + ?Sized,
{
    match tokio::time::timeout(limit, transport.get(uri)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            uri: uri.to_string(),
            after: limit,
        }),
    }
}
