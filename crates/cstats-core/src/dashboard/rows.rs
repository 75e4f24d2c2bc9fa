//! Display rows and sorting.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::format::{
    format_market_cap_in, format_percent_change, format_price_in, format_total_supply,
    or_missing,
};
use crate::snapshot::AssetRecord;

/// One table row, every figure already rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub rank: usize,
    pub name: String,
    pub price: String,
    pub hour_change: String,
    pub day_change: String,
    pub market_cap: String,
    pub symbol: String,
    pub total_supply: String,

    #[serde(skip)]
    pub asset: AssetRecord,
}

impl DisplayRow {
    pub fn new(rank: usize, asset: &AssetRecord, currency: &str) -> Self {
        Self {
            rank,
            name: asset.name.clone(),
            price: or_missing(asset.price, |p| format_price_in(p, currency)),
            hour_change: or_missing(asset.percent_change_1h, format_percent_change),
            day_change: or_missing(asset.percent_change_24h, format_percent_change),
            market_cap: or_missing(asset.market_cap, |m| format_market_cap_in(m, currency)),
            symbol: asset.symbol.clone(),
            total_supply: or_missing(asset.total_supply, |s| {
                format_total_supply(s, &asset.symbol)
            }),
            asset: asset.clone(),
        }
    }
}

/// Rows in input order with 1-based ranks.
pub fn build_rows(assets: &[AssetRecord], currency: &str) -> Vec<DisplayRow> {
    assets
        .iter()
        .enumerate()
        .map(|(i, asset)| DisplayRow::new(i + 1, asset, currency))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Rank,
    Name,
    Price,
    Change1h,
    Change24h,
    MarketCap,
    Supply,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rank" => Some(SortKey::Rank),
            "name" => Some(SortKey::Name),
            "price" => Some(SortKey::Price),
            "change-1h" | "1h" => Some(SortKey::Change1h),
            "change-24h" | "24h" => Some(SortKey::Change24h),
            "market-cap" | "mcap" => Some(SortKey::MarketCap),
            "supply" => Some(SortKey::Supply),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Rank => "rank",
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Change1h => "change-1h",
            SortKey::Change24h => "change-24h",
            SortKey::MarketCap => "market-cap",
            SortKey::Supply => "supply",
        }
    }

    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Rank,
            SortKey::Name,
            SortKey::Price,
            SortKey::Change1h,
            SortKey::Change24h,
            SortKey::MarketCap,
            SortKey::Supply,
        ]
    }

    fn numeric_value(&self, asset: &AssetRecord) -> Option<f64> {
        match self {
            SortKey::Price => asset.price,
            SortKey::Change1h => asset.percent_change_1h,
            SortKey::Change24h => asset.percent_change_24h,
            SortKey::MarketCap => asset.market_cap,
            SortKey::Supply => asset.total_supply,
            SortKey::Rank | SortKey::Name => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Reorder rows by `key`. Ranks are kept; absent values sort last either way.
pub fn sort_rows(rows: &mut [DisplayRow], key: SortKey, order: SortOrder) {
    rows.sort_by(|a, b| compare_rows(a, b, key, order).then(a.rank.cmp(&b.rank)));
}

fn compare_rows(a: &DisplayRow, b: &DisplayRow, key: SortKey, order: SortOrder) -> Ordering {
    match key {
        SortKey::Rank => order.apply(a.rank.cmp(&b.rank)),
        SortKey::Name => order.apply(a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        _ => match (key.numeric_value(&a.asset), key.numeric_value(&b.asset)) {
            (Some(x), Some(y)) => order.apply(x.total_cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(symbol: &str, price: Option<f64>, day: Option<f64>) -> AssetRecord {
        AssetRecord {
            symbol: symbol.to_string(),
            name: format!("{} coin", symbol),
            price,
            percent_change_1h: Some(0.1),
            percent_change_24h: day,
            market_cap: Some(1_000_000.0),
            total_supply: Some(21_000_000.0),
        }
    }

    fn ranks(rows: &[DisplayRow]) -> Vec<usize> {
        rows.iter().map(|r| r.rank).collect()
    }

    #[test]
    fn test_build_rows_assigns_ranks_in_input_order() {
        let rows = build_rows(
            &[
                asset("BTC", Some(64000.0), Some(2.0)),
                asset("ETH", Some(3100.0), Some(-3.456)),
            ],
            "USD",
        );

        assert_eq!(ranks(&rows), vec![1, 2]);
        assert_eq!(rows[0].price, "$64,000");
        assert_eq!(rows[0].day_change, "▲ 2.00%");
        assert_eq!(rows[1].day_change, "▼ 3.46%");
        assert_eq!(rows[1].total_supply, "21000000 ETH");
        assert_eq!(rows[1].market_cap, "$1e+06");
    }

    #[test]
    fn test_missing_figures_render_as_dash() {
        let rows = build_rows(&[asset("NEW", None, None)], "USD");
        assert_eq!(rows[0].price, "-");
        assert_eq!(rows[0].day_change, "-");
    }

    #[test]
    fn test_empty_input_gives_no_rows() {
        assert!(build_rows(&[], "USD").is_empty());
    }

    #[test]
    fn test_sort_by_price_keeps_ranks() {
        let mut rows = build_rows(
            &[
                asset("A", Some(5.0), None),
                asset("B", Some(50.0), None),
                asset("C", Some(0.5), None),
            ],
            "USD",
        );

        sort_rows(&mut rows, SortKey::Price, SortOrder::Ascending);
        assert_eq!(ranks(&rows), vec![3, 1, 2]);

        sort_rows(&mut rows, SortKey::Price, SortOrder::Descending);
        assert_eq!(ranks(&rows), vec![2, 1, 3]);

        sort_rows(&mut rows, SortKey::Rank, SortOrder::Ascending);
        assert_eq!(ranks(&rows), vec![1, 2, 3]);
    }

    #[test]
    fn test_absent_values_sort_last_in_both_orders() {
        let mut rows = build_rows(
            &[
                asset("A", None, Some(1.0)),
                asset("B", Some(10.0), Some(-1.0)),
                asset("C", Some(20.0), None),
            ],
            "USD",
        );

        sort_rows(&mut rows, SortKey::Price, SortOrder::Descending);
        assert_eq!(ranks(&rows), vec![3, 2, 1]);

        sort_rows(&mut rows, SortKey::Change24h, SortOrder::Ascending);
        assert_eq!(ranks(&rows), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let mut rows = build_rows(
            &[asset("b", None, None), asset("A", None, None), asset("c", None, None)],
            "USD",
        );
        sort_rows(&mut rows, SortKey::Name, SortOrder::Ascending);
        assert_eq!(ranks(&rows), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("market-cap"), Some(SortKey::MarketCap));
        assert_eq!(SortKey::parse("24H"), Some(SortKey::Change24h));
        assert_eq!(SortKey::parse("volume"), None);
        for key in SortKey::all() {
            assert_eq!(SortKey::parse(key.as_str()), Some(*key));
        }
    }
}
