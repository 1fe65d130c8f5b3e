//! OS shell actions
//!
//! Thin wrappers over the platform's own commands. These never affect
//! rendering; a failure here is surfaced as a user notice.

use crate::{Result, StoreError};
use std::path::Path;
use std::process::Command;

/// Open a folder in the platform file browser.
pub fn open_folder(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(StoreError::NotFound(path.display().to_string()));
    }

    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("explorer");
        c.arg(path);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.arg(path);
        c
    } else if cfg!(target_os = "linux") {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    } else {
        return Err(StoreError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ));
    };

    command
        .spawn()
        .map_err(|e| StoreError::Shell(e.to_string()))?;
    Ok(())
}

/// Send a document to the platform print pipeline.
pub fn print_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.display().to_string()));
    }

    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("powershell");
        c.args(["-NoProfile", "-Command", "Start-Process", "-Verb", "Print", "-FilePath"])
            .arg(path);
        c
    } else if cfg!(target_os = "macos") {
        let mut c = Command::new("open");
        c.args(["-a", "Preview"]).arg(path);
        c
    } else if cfg!(target_os = "linux") {
        let mut c = Command::new("lp");
        c.arg(path);
        c
    } else {
        return Err(StoreError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ));
    };

    command
        .spawn()
        .map_err(|e| StoreError::Shell(e.to_string()))?;
    Ok(())
}
