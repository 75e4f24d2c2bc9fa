//! Rate-limited refresh controller.
//!
//! A pull is attempted only when no successful pull is recorded or the
//! configured cooldown has elapsed since the last one. Every attempt yields a
//! [`RefreshStatus`]; nothing here returns an error.

pub mod controller;
pub mod types;

use crate::config::CstatsConfig;
use crate::fetch::HttpFetcher;
use crate::timestamp::{TimestampStore, open_store};

pub use controller::RefreshController;
pub use types::{
    ControllerState, RATE_LIMITED_MESSAGE, RefreshStatus, SUCCESS_MESSAGE, StatusDetail,
};

/// Controller wired to the configured timestamp backend and the HTTP fetcher.
pub type DefaultController = RefreshController<Box<dyn TimestampStore>, HttpFetcher>;

/// Build the controller described by `config`.
pub fn build_controller(config: &CstatsConfig) -> DefaultController {
    let store = open_store(config);
    let fetcher = HttpFetcher::new(&config.api, config.snapshot_path());
    RefreshController::new(store, fetcher, config.refresh.cooldown())
}
