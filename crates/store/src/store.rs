//! Generated-document storage
//!
//! The storage directory is flat: every generated document is a `.pdf`
//! file directly under the configured prints path.

use crate::{Result, StoreError};
use chrono::Local;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// A folder of generated documents.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the documents in the storage directory, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let is_pdf = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if path.is_file() && is_pdf {
                if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Persist document bytes under a timestamp-based name.
    pub fn save(&self, bytes: &[u8]) -> Result<PathBuf> {
        let name = format!("factura_{}.pdf", Local::now().format("%Y%m%d_%H%M%S"));
        self.save_as(&name, bytes)
    }

    /// Persist document bytes under a caller-chosen name.
    pub fn save_as(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(name);
        fs::write(&path, bytes)?;
        info!("document written to {}", path.display());
        Ok(path)
    }

    /// Delete a stored document by name.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        fs::remove_file(&path)?;
        info!("document deleted: {}", path.display());
        Ok(())
    }

    /// Full path of a stored document (whether or not it exists).
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}
