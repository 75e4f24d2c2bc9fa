//! Atomic file replacement.
//!
//! Readers of the snapshot and timestamp files must never observe a
//! partially written document, so every write goes to a sibling temp file
//! that is renamed over the destination.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn cleanup_temp_file(temp_file: &Path, original_error: &io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.persistence.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            "Failed to clean up temp file after write error"
        );
    }
}

/// Replace `path` with `contents`, creating parent directories as needed.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let temp_file = temp_path_for(path);

    if let Err(e) = fs::write(&temp_file, contents) {
        cleanup_temp_file(&temp_file, &e);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(e);
    }

    Ok(())
}
