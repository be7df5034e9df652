use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BackupError;

/// Sibling path the manifest is copied to: `<manifest>.backup.<YYYY-MM-DD>_<HHMMSS>`.
pub fn backup_path(manifest: &Path, at: DateTime<Local>) -> PathBuf {
    let mut name = manifest.as_os_str().to_os_string();
    name.push(".backup.");
    name.push(at.format("%Y-%m-%d_%H%M%S").to_string());
    PathBuf::from(name)
}

/// Copies `manifest` next to itself, stamped with the current local time.
pub fn create_backup(manifest: &Path) -> Result<PathBuf, BackupError> {
    let target = backup_path(manifest, Local::now());
    fs::copy(manifest, &target).map_err(|source| BackupError {
        path: manifest.to_path_buf(),
        source,
    })?;
    Ok(target)
}
