mod json_file;
mod settings;

pub use json_file::JsonFileStore;
pub use settings::{SETTINGS_NAMESPACE, SettingsStore, TIMESTAMP_KEY};
