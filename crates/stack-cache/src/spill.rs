//! Disk spillover for persistent cache entries.
//!
//! One file per entry under the spill directory, named by a sanitized form of
//! the cache key. Writes go through a same-directory temp file and rename so
//! a crashed process never leaves a torn entry behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default spill directory under the platform cache dir, if one exists.
pub fn default_spill_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("stacksmith"))
}

/// Map a cache key to its spill file path.
pub fn entry_path(spill_dir: &Path, key: &str) -> PathBuf {
    spill_dir.join(format!("{}.bin", sanitize_key(key)))
}

/// Replace filesystem-hostile characters so any key yields a valid filename.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Write an entry to disk via temp-then-rename.
pub fn write_entry(spill_dir: &Path, key: &str, value: &[u8]) -> Result<()> {
    fs::create_dir_all(spill_dir).map_err(|e| Error::io(spill_dir, e))?;

    let target = entry_path(spill_dir, key);
    let temp = spill_dir.join(format!(
        ".{}.{}.tmp",
        sanitize_key(key),
        std::process::id()
    ));

    let mut file = fs::File::create(&temp).map_err(|e| Error::io(&temp, e))?;
    file.write_all(value).map_err(|e| Error::io(&temp, e))?;
    file.sync_all().map_err(|e| Error::io(&temp, e))?;
    fs::rename(&temp, &target).map_err(|e| Error::io(&target, e))?;
    Ok(())
}

/// Read an entry back, or `None` if it was never spilled.
pub fn read_entry(spill_dir: &Path, key: &str) -> Result<Option<Vec<u8>>> {
    let path = entry_path(spill_dir, key);
    match fs::read(&path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&path, e)),
    }
}

/// Remove an entry's spill file if present.
pub fn remove_entry(spill_dir: &Path, key: &str) -> Result<()> {
    let path = entry_path(spill_dir, key);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(&path, e)),
    }
}

/// Remove every spilled entry.
pub fn clear(spill_dir: &Path) -> Result<()> {
    if !spill_dir.exists() {
        return Ok(());
    }
    let entries = fs::read_dir(spill_dir).map_err(|e| Error::io(spill_dir, e))?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "bin") {
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        }
    }
    Ok(())
}
