use crate::config::{Catalogue, ClientConfig};
use crate::model::ItemId;

/// One request of a batch: the URI plus its position in the caller's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    ordinal: usize,
    uri: String,
}

impl FetchTarget {
    pub fn new(ordinal: usize, uri: impl Into<String>) -> Self {
        Self {
            ordinal,
            uri: uri.into(),
        }
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Builds detail and graph URIs for one catalogue. No I/O.
#[derive(Debug, Clone)]
pub struct Endpoints {
    root: String,
}

impl Endpoints {
    pub fn new(base_url: &str, catalogue: Catalogue) -> Self {
        Self {
            root: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                catalogue.path_segment()
            ),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, config.catalogue)
    }

    pub fn detail_uri(&self, id: ItemId) -> String {
        format!("{}/api/catalogue/detail.json?item={id}", self.root)
    }

    pub fn graph_uri(&self, id: ItemId) -> String {
        format!("{}/api/graph/{id}.json", self.root)
    }

    pub fn detail_targets(&self, ids: &[ItemId]) -> Vec<FetchTarget> {
        ids.iter()
            .enumerate()
            .map(|(ordinal, id)| FetchTarget::new(ordinal, self.detail_uri(*id)))
            .collect()
    }

    pub fn graph_targets(&self, ids: &[ItemId]) -> Vec<FetchTarget> {
        ids.iter()
            .enumerate()
            .map(|(ordinal, id)| FetchTarget::new(ordinal, self.graph_uri(*id)))
            .collect()
    }
}
