pub mod errors;
pub mod persistence;
pub mod types;

pub use errors::SnapshotError;
pub use persistence::{load_snapshot, save_snapshot, stamp_document};
pub use types::{AssetRecord, LAST_TIME_PULLED_KEY, ListingEntry, Quote, Snapshot, SnapshotDocument};
