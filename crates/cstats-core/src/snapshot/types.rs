//! Snapshot document model.
//!
//! On disk the snapshot is the raw listings response plus `LastTimePulled`.
//! Only the fields the dashboard needs are typed here; everything else in the
//! document is left untouched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key injected into the response document at write time.
pub const LAST_TIME_PULLED_KEY: &str = "LastTimePulled";

/// Typed view of the snapshot document as read from disk.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub data: Vec<ListingEntry>,

    #[serde(rename = "LastTimePulled", default)]
    pub last_time_pulled: Option<String>,
}

/// One asset as the listings API reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub quote: BTreeMap<String, Quote>,
}

/// Per-currency market figures.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Quote {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub percent_change_1h: Option<f64>,
    #[serde(default)]
    pub percent_change_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// One asset flattened to the figures quoted in a single currency.
///
/// Numeric fields the API reported as `null` (or that are missing for the
/// requested currency) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRecord {
    pub symbol: String,
    pub name: String,
    pub price: Option<f64>,
    pub percent_change_1h: Option<f64>,
    pub percent_change_24h: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_supply: Option<f64>,
}

impl AssetRecord {
    pub fn from_entry(entry: &ListingEntry, currency: &str) -> Self {
        let quote = entry.quote.get(currency).cloned().unwrap_or_default();
        Self {
            symbol: entry.symbol.clone(),
            name: entry.name.clone(),
            price: quote.price,
            percent_change_1h: quote.percent_change_1h,
            percent_change_24h: quote.percent_change_24h,
            market_cap: quote.market_cap,
            total_supply: entry.total_supply,
        }
    }
}

/// The most recent successful pull, resolved to one quote currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub assets: Vec<AssetRecord>,
    pub currency: String,
    pub last_time_pulled: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn from_document(document: &SnapshotDocument, currency: &str) -> Self {
        Self {
            assets: document
                .data
                .iter()
                .map(|entry| AssetRecord::from_entry(entry, currency))
                .collect(),
            currency: currency.to_string(),
            last_time_pulled: document
                .last_time_pulled
                .as_deref()
                .and_then(crate::timestamp::parse_instant),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> SnapshotDocument {
        serde_json::from_str(
            r#"{
                "status": {"error_code": 0},
                "data": [
                    {
                        "name": "Bitcoin",
                        "symbol": "BTC",
                        "total_supply": 19700000,
                        "quote": {"USD": {
                            "price": 64000.12,
                            "percent_change_1h": 0.25,
                            "percent_change_24h": -1.5,
                            "market_cap": 1260000000000.0
                        }}
                    },
                    {
                        "name": "Tether",
                        "symbol": "USDT",
                        "total_supply": null,
                        "quote": {"USD": {"price": 1.0, "percent_change_1h": null}}
                    }
                ],
                "LastTimePulled": "2024-05-01T10:00:00.000000Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_snapshot_from_document() {
        let snapshot = Snapshot::from_document(&sample_document(), "USD");

        assert_eq!(snapshot.assets.len(), 2);
        assert_eq!(snapshot.assets[0].symbol, "BTC");
        assert_eq!(snapshot.assets[0].price, Some(64000.12));
        assert_eq!(snapshot.assets[0].percent_change_24h, Some(-1.5));
        assert_eq!(snapshot.assets[0].total_supply, Some(19_700_000.0));
        assert!(snapshot.last_time_pulled.is_some());
    }

    #[test]
    fn test_null_fields_become_none() {
        let snapshot = Snapshot::from_document(&sample_document(), "USD");
        let tether = &snapshot.assets[1];
        assert_eq!(tether.total_supply, None);
        assert_eq!(tether.percent_change_1h, None);
        assert_eq!(tether.market_cap, None);
    }

    #[test]
    fn test_missing_currency_yields_empty_quote() {
        let snapshot = Snapshot::from_document(&sample_document(), "EUR");
        assert_eq!(snapshot.assets[0].name, "Bitcoin");
        assert_eq!(snapshot.assets[0].price, None);
    }

    #[test]
    fn test_document_without_data_is_empty() {
        let document: SnapshotDocument = serde_json::from_str("{}").unwrap();
        let snapshot = Snapshot::from_document(&document, "USD");
        assert!(snapshot.is_empty());
        assert!(snapshot.last_time_pulled.is_none());
    }
}
