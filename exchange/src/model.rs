//! Wire records returned by the item database.
//!
//! Field names and types follow the JSON exactly, including the fields the service
//! sends as strings (`members`, `today.price`, `change`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ItemId = u32;

/// Response of the item detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub icon: String,
    pub icon_large: String,
    pub id: ItemId,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(rename = "typeIcon")]
    pub type_icon: String,
    pub name: String,
    pub description: String,
    /// `"true"` or `"false"`
    pub members: String,
    pub current: PriceCurrentDetail,
    pub today: PriceTodayDetail,
    pub day30: PriceChange,
    pub day90: PriceChange,
    pub day180: PriceChange,
}

impl Item {
    pub fn is_members(&self) -> bool {
        self.members.trim().eq_ignore_ascii_case("true")
    }
}

/// Trend over a fixed window, e.g. `{"trend": "positive", "change": "+5.0%"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub trend: String,
    pub change: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCurrentDetail {
    pub trend: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTodayDetail {
    pub trend: String,
    /// Signed delta as sent by the service, e.g. `"- 1"` or `"+12"`
    pub price: String,
}

/// Response of the graph endpoint: prices over the last 180 days keyed by epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGraph {
    pub daily: BTreeMap<String, i64>,
    pub average: BTreeMap<String, i64>,
}

impl ItemGraph {
    /// Daily prices as time-ordered points.
    pub fn daily_series(&self) -> Vec<(DateTime<Utc>, i64)> {
        to_series(&self.daily)
    }

    /// Rolling averages as time-ordered points.
    pub fn average_series(&self) -> Vec<(DateTime<Utc>, i64)> {
        to_series(&self.average)
    }

    pub fn latest_daily(&self) -> Option<(DateTime<Utc>, i64)> {
        self.daily_series().pop()
    }
}

// Keys that are not epoch milliseconds are skipped.
fn to_series(points: &BTreeMap<String, i64>) -> Vec<(DateTime<Utc>, i64)> {
    let mut series: Vec<_> = points
        .iter()
        .filter_map(|(key, value)| {
            let millis = key.trim().parse::<i64>().ok()?;
            DateTime::from_timestamp_millis(millis).map(|at| (at, *value))
        })
        .collect();
    series.sort_by_key(|(at, _)| *at);
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{detail_json, graph_json};

    #[test]
    fn test_detail_wire_names() {
        let detail: ItemDetail = serde_json::from_str(&detail_json(4151)).unwrap();
        assert_eq!(detail.item.id, 4151);
        assert_eq!(detail.item.item_type, "Miscellaneous");
        assert_eq!(detail.item.type_icon, "https://www.runescape.com/img/categories/Miscellaneous");
        assert_eq!(detail.item.today.price, "- 1");
        assert_eq!(detail.item.day180.change, "+12.0%");
        assert!(detail.item.is_members());

        let back = serde_json::to_value(&detail).unwrap();
        assert!(back["item"].get("typeIcon").is_some());
        assert!(back["item"].get("type").is_some());
        assert!(back["item"]["members"].is_string());
    }

    #[test]
    fn test_members_flag_is_string() {
        let mut value: serde_json::Value = serde_json::from_str(&detail_json(1)).unwrap();
        value["item"]["members"] = serde_json::Value::Bool(true);
        assert!(serde_json::from_value::<ItemDetail>(value).is_err());
    }

    #[test]
    fn test_graph_series_sorted() {
        let graph: ItemGraph = serde_json::from_str(&graph_json()).unwrap();
        let daily = graph.daily_series();
        assert_eq!(daily.len(), 3);
        assert!(daily.windows(2).all(|w| w[0].0 < w[1].0));

        let (at, price) = graph.latest_daily().unwrap();
        assert_eq!(at.timestamp_millis(), 1_700_172_800_000);
        assert_eq!(price, 1_530_000);
        assert_eq!(graph.average_series().len(), 3);
    }

    #[test]
    fn test_graph_skips_bad_keys() {
        let mut graph: ItemGraph = serde_json::from_str(&graph_json()).unwrap();
        graph.daily.insert("yesterday".into(), 5);
        assert_eq!(graph.daily_series().len(), 3);
    }
}
