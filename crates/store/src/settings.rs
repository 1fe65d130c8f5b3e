//! Settings persistence
//!
//! Two configuration sources: `settings.json`, which the program may
//! rewrite (currently only the prints path changes at runtime), and
//! `gui_config.json`, a read-only bundle file describing the invoice
//! canvas and output page.

use crate::{Result, StoreError};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_update_time() -> u64 {
    1
}

/// Mutable program settings, stored in `settings.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub debug: bool,

    /// Hot-reload interval for the geometry specification, in seconds
    #[serde(default = "default_update_time")]
    pub update_time: u64,

    /// Directory where generated documents are stored; empty until the
    /// user picks one
    #[serde(default)]
    pub prints_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            update_time: 1,
            prints_path: String::new(),
        }
    }
}

/// Pairs the settings values with the file they live in.
#[derive(Debug)]
pub struct SettingsManager {
    path: PathBuf,
    pub settings: Settings,
}

impl SettingsManager {
    /// Load settings, writing a default file first if none exists.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let defaults = serde_json::to_string_pretty(&Settings::default())
                .map_err(|e| StoreError::MalformedConfig(e.to_string()))?;
            fs::write(path, defaults)?;
            info!("created default settings at {}", path.display());
        }

        let data = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&data)
            .map_err(|e| StoreError::MalformedConfig(e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            settings,
        })
    }

    /// Update the prints directory and persist the change.
    pub fn set_prints_path(&mut self, new_path: &str) -> Result<()> {
        let old_path = std::mem::replace(&mut self.settings.prints_path, new_path.to_string());
        if let Err(e) = self.save() {
            // Keep memory and disk consistent if the write failed
            self.settings.prints_path = old_path;
            return Err(e);
        }
        info!("prints path updated from '{old_path}' to '{new_path}'");
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.settings)
            .map_err(|e| StoreError::MalformedConfig(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn default_geometry_path() -> String {
    "inputs_geometry.json".to_string()
}

fn default_page_width() -> f64 {
    612.0 // 8.5 in
}

fn default_page_height() -> f64 {
    792.0 // 11 in
}

/// Read-only bundle configuration (`gui_config.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuiConfig {
    /// Editor canvas size in pixels
    pub invoice_width: f64,
    pub invoice_height: f64,

    pub window_width: u32,
    pub window_height: u32,

    /// Background shown behind the editor fields, relative to the
    /// configuration directory
    pub invoice_background_path: String,

    pub app_title: String,

    #[serde(default)]
    pub margin_top: f64,
    #[serde(default)]
    pub margin_bottom: f64,

    /// Geometry specification file, relative to the configuration
    /// directory
    #[serde(default = "default_geometry_path")]
    pub geometry_path: String,

    /// Output page size in points (US-Letter unless overridden)
    #[serde(default = "default_page_width")]
    pub page_width: f64,
    #[serde(default = "default_page_height")]
    pub page_height: f64,

    /// Stamp the background image into generated documents (for plain
    /// paper; pre-printed forms leave this off)
    #[serde(default)]
    pub embed_background: bool,
}

impl GuiConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|e| StoreError::MalformedConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(!settings.debug);
        assert_eq!(settings.update_time, 1);
        assert_eq!(settings.prints_path, "");
    }

    #[test]
    fn test_gui_config_optional_fields() {
        let config: GuiConfig = serde_json::from_str(
            r#"{
                "invoice_width": 400,
                "invoice_height": 500,
                "window_width": 1200,
                "window_height": 800,
                "invoice_background_path": "assets/factura.png",
                "app_title": "Facturación"
            }"#,
        )
        .unwrap();

        assert_eq!(config.page_width, 612.0);
        assert_eq!(config.page_height, 792.0);
        assert_eq!(config.geometry_path, "inputs_geometry.json");
        assert!(!config.embed_background);
    }
}
