//! Atomic file replacement
//!
//! Output is staged next to the target and renamed into place, so readers
//! never observe a half-written JSON file.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `content` to `target`, replacing any existing file
///
/// Missing parent directories are created.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", parent, e))?;
    }

    let staging = staging_path(target);
    fs::write(&staging, content).map_err(|e| io_error("write_output_temp", &staging, e))?;

    if let Err(e) = fs::rename(&staging, target) {
        let _ = fs::remove_file(&staging);
        return Err(io_error("rename_output_temp", target, e));
    }

    Ok(())
}

// `posts.json` stages as `.posts.json.tmp`
fn staging_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(target.file_name().unwrap_or_default());
    name.push(".tmp");
    target.with_file_name(name)
}
