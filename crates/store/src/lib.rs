//! Platform collaborators for facturador
//!
//! This crate provides:
//! - Settings persistence (`settings.json`) and the read-only GUI
//!   configuration bundle
//! - Storage for generated documents (list, save, delete)
//! - OS shell actions (open the documents folder, print a document)
//!
//! Nothing here touches the layout or rendering core; the core emits
//! document bytes and this crate decides where they live.

pub mod settings;
pub mod shell;
mod store;

pub use settings::{GuiConfig, Settings, SettingsManager};
pub use store::DocumentStore;

use thiserror::Error;

/// Errors that can occur in storage, settings and shell operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to persist: {0}")]
    Persist(#[from] std::io::Error),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Malformed configuration: {0}")]
    MalformedConfig(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Shell command failed: {0}")]
    Shell(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
