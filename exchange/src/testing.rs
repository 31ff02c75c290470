//! In-memory transport and payload fixtures for unit tests.

use crate::error::FetchError;
use crate::model::ItemId;
use crate::transport::Transport;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) enum Reply {
    Body(Vec<u8>),
    Delayed(Duration, Vec<u8>),
    Refuse,
    Status(u16),
    ReadFail,
    Hang,
    Panic,
}

impl Reply {
    pub(crate) fn body(body: impl Into<Vec<u8>>) -> Self {
        Self::Body(body.into())
    }
}

/// Answers each URI with a scripted reply and records call statistics.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: HashMap<String, Reply>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(mut self, uri: impl Into<String>, reply: Reply) -> Self {
        self.routes.insert(uri.into(), reply);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        match self.routes.get(uri) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Delayed(delay, body)) => {
                tokio::time::sleep(*delay).await;
                Ok(body.clone())
            }
            Some(Reply::Refuse) | None => Err(FetchError::network(uri, "connection refused")),
            Some(Reply::Status(status)) => Err(FetchError::Status {
                uri: uri.to_string(),
                status: *status,
            }),
            Some(Reply::ReadFail) => Err(FetchError::read(uri, "connection reset mid-body")),
            Some(Reply::Hang) => std::future::pending().await,
            Some(Reply::Panic) => panic!("scripted panic for {uri}"),
        }
    }
}

pub(crate) fn detail_json(id: ItemId) -> String {
    serde_json::json!({
        "item": {
            "icon": format!("https://secure.runescape.com/m=itemdb_rs/obj_sprite.gif?id={id}"),
            "icon_large": format!("https://secure.runescape.com/m=itemdb_rs/obj_big.gif?id={id}"),
            "id": id,
            "type": "Miscellaneous",
            "typeIcon": "https://www.runescape.com/img/categories/Miscellaneous",
            "name": format!("Item {id}"),
            "description": "A test item.",
            "current": { "trend": "neutral", "price": 1530 },
            "today": { "trend": "neutral", "price": "- 1" },
            "members": "true",
            "day30": { "trend": "positive", "change": "+2.0%" },
            "day90": { "trend": "negative", "change": "-4.0%" },
            "day180": { "trend": "positive", "change": "+12.0%" }
        }
    })
    .to_string()
}

pub(crate) fn graph_json() -> String {
    serde_json::json!({
        "daily": {
            "1700000000000": 1_500_000,
            "1700172800000": 1_530_000,
            "1700086400000": 1_510_000
        },
        "average": {
            "1700000000000": 1_490_000,
            "1700086400000": 1_495_000,
            "1700172800000": 1_505_000
        }
    })
    .to_string()
}
