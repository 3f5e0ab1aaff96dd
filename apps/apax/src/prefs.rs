//! # Prefs File I/O
//!
//! Reads and writes the persisted view selection. The format itself lives
//! in `apax_core::formats`; this module only touches the filesystem.

use std::path::Path;

use apax_core::{ApaxError, UiPrefs, prefs_from_bytes, prefs_to_bytes};

/// Load prefs from disk.
///
/// A missing file is not an error — first launch simply gets the default
/// view. A present-but-corrupt file is reported, not silently replaced.
pub fn load_prefs(path: &Path) -> Result<UiPrefs, ApaxError> {
    if !path.exists() {
        return Ok(UiPrefs::default());
    }
    let bytes = std::fs::read(path).map_err(|e| {
        ApaxError::IoError(format!("Cannot read prefs '{}': {}", path.display(), e))
    })?;
    prefs_from_bytes(&bytes)
}

/// Write prefs to disk.
pub fn save_prefs(path: &Path, prefs: &UiPrefs) -> Result<(), ApaxError> {
    let bytes = prefs_to_bytes(prefs)?;
    std::fs::write(path, bytes).map_err(|e| {
        ApaxError::IoError(format!("Cannot write prefs '{}': {}", path.display(), e))
    })
}
