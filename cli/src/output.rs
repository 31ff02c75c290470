//! JSON rendering of fetched records.

use anyhow::{Context, Result};
use grand_exchange::Catalogue;
use serde::Serialize;
use tracing::info;

/// Envelope printed to stdout for every command.
#[derive(Debug, Serialize)]
pub struct Report<T> {
    pub catalogue: String,
    pub requested: usize,
    pub returned: usize,
    pub records: Vec<T>,
}

impl<T: Serialize> Report<T> {
    pub fn new(catalogue: Catalogue, requested: usize, records: Vec<T>) -> Self {
        Self {
            catalogue: catalogue.to_string(),
            requested,
            returned: records.len(),
            records,
        }
    }

    pub fn render(&self, compact: bool) -> Result<String> {
        if compact {
            serde_json::to_string(self).context("Failed to serialize report")
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize report")
        }
    }

    /// Print the report to stdout and a one-line summary to the log.
    pub fn emit(&self, what: &str, compact: bool) -> Result<()> {
        println!("{}", self.render(compact)?);

        let missing = self.requested.saturating_sub(self.returned);
        if missing == 0 {
            info!(target: "plain", "✔ {} {what} record(s) fetched", self.returned);
        } else {
            info!(
                target: "plain",
                "✔ {} of {} {what} record(s) fetched, {missing} unavailable",
                self.returned,
                self.requested
            );
        }
        Ok(())
    }
}
