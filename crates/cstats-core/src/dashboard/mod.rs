//! Presentation adapter: turns a snapshot into rendered table rows, sort
//! order, selection and a detail panel. Rendering itself is left to callers.

pub mod format;
pub mod rows;
pub mod state;

pub use format::{
    currency_prefix, format_general, format_market_cap, format_market_cap_in,
    format_percent_change, format_price, format_price_in, format_total_supply,
};
pub use rows::{DisplayRow, SortKey, SortOrder, build_rows, sort_rows};
pub use state::{DashboardState, DetailPanel, Trend};
