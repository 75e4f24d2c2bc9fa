//! Dashboard application state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::format::is_positive_change;
use super::rows::{DisplayRow, SortKey, SortOrder, build_rows, sort_rows};
use crate::refresh::RefreshStatus;
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Trend of an already formatted percent change.
    pub fn from_change(formatted: &str) -> Self {
        if is_positive_change(formatted) {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// Details shown for the selected asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub rank: usize,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub total_supply: String,
    pub day_change: String,
    /// `None` when the 24h change is unknown.
    pub trend: Option<Trend>,
}

impl DetailPanel {
    pub fn from_row(row: &DisplayRow) -> Self {
        Self {
            rank: row.rank,
            name: row.name.clone(),
            symbol: row.symbol.clone(),
            price: row.price.clone(),
            total_supply: row.total_supply.clone(),
            day_change: row.day_change.clone(),
            trend: row
                .asset
                .percent_change_24h
                .map(|_| Trend::from_change(&row.day_change)),
        }
    }
}

/// Everything a renderer needs: rows, sort, selection and the last refresh result.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    rows: Vec<DisplayRow>,
    sort_key: SortKey,
    sort_order: SortOrder,
    selected_rank: Option<usize>,
    status: Option<RefreshStatus>,
    last_time_pulled: Option<DateTime<Utc>>,
    currency: String,
}

impl DashboardState {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            rows: build_rows(&snapshot.assets, &snapshot.currency),
            last_time_pulled: snapshot.last_time_pulled,
            currency: snapshot.currency.clone(),
            ..Default::default()
        }
    }

    /// State with no snapshot loaded yet.
    pub fn empty(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            ..Default::default()
        }
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn last_time_pulled(&self) -> Option<DateTime<Utc>> {
        self.last_time_pulled
    }

    pub fn sort(&self) -> (SortKey, SortOrder) {
        (self.sort_key, self.sort_order)
    }

    pub fn sort_by(&mut self, key: SortKey, order: SortOrder) {
        self.sort_key = key;
        self.sort_order = order;
        sort_rows(&mut self.rows, key, order);
    }

    /// Select the row with the given rank. Rank 0 is treated as 1.
    ///
    /// Clears the selection and returns `None` when no row has that rank.
    pub fn select_rank(&mut self, rank: usize) -> Option<&DisplayRow> {
        let rank = rank.max(1);
        self.selected_rank = self.rows.iter().any(|r| r.rank == rank).then_some(rank);
        self.selected()
    }

    /// Select the first row whose symbol matches, ignoring case.
    pub fn select_symbol(&mut self, symbol: &str) -> Option<&DisplayRow> {
        self.selected_rank = self
            .rows
            .iter()
            .find(|r| r.symbol.eq_ignore_ascii_case(symbol))
            .map(|r| r.rank);
        self.selected()
    }

    /// Select by rank if `query` is a number, otherwise by symbol.
    pub fn select(&mut self, query: &str) -> Option<&DisplayRow> {
        match query.trim().parse::<usize>() {
            Ok(rank) => self.select_rank(rank),
            Err(_) => self.select_symbol(query.trim()),
        }
    }

    pub fn selected(&self) -> Option<&DisplayRow> {
        let rank = self.selected_rank?;
        self.rows.iter().find(|r| r.rank == rank)
    }

    pub fn detail(&self) -> Option<DetailPanel> {
        self.selected().map(DetailPanel::from_row)
    }

    pub fn set_status(&mut self, status: RefreshStatus) {
        self.status = Some(status);
    }

    pub fn status(&self) -> Option<&RefreshStatus> {
        self.status.as_ref()
    }

    /// Text for the status bar: last refresh result and snapshot age.
    pub fn status_line(&self) -> String {
        let pulled = match self.last_time_pulled {
            Some(instant) => format!(
                "Last pulled: {}",
                instant.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            None => "No data pulled yet".to_string(),
        };

        match &self.status {
            Some(status) => format!("{} | {}", status.summary(), pulled),
            None => pulled,
        }
    }
}
