//! # Facturador CLI
//!
//! Fills the invoice template from a values file and manages the folder
//! of generated documents.
//!
//! ## Usage
//!
//! ```bash
//! # Configure where documents are stored
//! facturador set-path ~/Documentos/facturas
//!
//! # Inspect the fields defined by the geometry specification
//! facturador fields
//!
//! # Fill the template and write a print-ready PDF
//! facturador render --values venta.json
//!
//! # Manage generated documents
//! facturador list
//! facturador print factura_20240101_120000.pdf
//! facturador delete factura_20240101_120000.pdf
//! facturador open-folder
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use layout::{load_fields, Registry, RenderError, Renderer};
use std::path::{Path, PathBuf};
use store::{shell, DocumentStore, GuiConfig, SettingsManager};

/// Facturador - invoice template filling and printing
#[derive(Parser, Debug)]
#[command(name = "facturador")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding settings.json, gui_config.json and the geometry
    /// specification
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill the invoice template and write a print-ready PDF
    Render {
        /// JSON file mapping field keys to values (strings fill text
        /// fields, booleans set toggles)
        #[arg(long)]
        values: PathBuf,

        /// Output file name (defaults to a timestamp-based name)
        #[arg(long)]
        out: Option<String>,
    },

    /// List the fields defined by the geometry specification
    Fields,

    /// List generated documents
    List,

    /// Delete a generated document
    Delete { name: String },

    /// Send a generated document to the system print pipeline
    Print { name: String },

    /// Open the documents folder in the file browser
    OpenFolder,

    /// Change the folder where generated documents are stored
    SetPath { path: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.config_dir);

    match cli.command {
        Commands::Render { values, out } => render(&cli.config_dir, &values, out),
        Commands::Fields => fields(&cli.config_dir),
        Commands::List => list(&cli.config_dir),
        Commands::Delete { name } => delete(&cli.config_dir, &name),
        Commands::Print { name } => print(&cli.config_dir, &name),
        Commands::OpenFolder => open_folder(&cli.config_dir),
        Commands::SetPath { path } => set_path(&cli.config_dir, &path),
    }
}

fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join("settings.json")
}

/// `"debug": true` in settings turns on debug-level logging unless
/// RUST_LOG already says otherwise.
fn init_logging(config_dir: &Path) {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        let debug = SettingsManager::load_or_init(settings_path(config_dir))
            .map(|manager| manager.settings.debug)
            .unwrap_or(false);
        builder.filter_level(if debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        });
    }
    builder.init();
}

fn load_gui(config_dir: &Path) -> Result<GuiConfig> {
    GuiConfig::load(config_dir.join("gui_config.json"))
        .with_context(|| format!("reading gui_config.json from {}", config_dir.display()))
}

/// The document store, or an error if no prints path is configured yet.
fn open_store(config_dir: &Path) -> Result<DocumentStore> {
    let manager = SettingsManager::load_or_init(settings_path(config_dir))?;
    let prints_path = manager.settings.prints_path.trim().to_string();
    if prints_path.is_empty() {
        bail!("no documents folder configured; run `facturador set-path <dir>` first");
    }
    Ok(DocumentStore::new(prints_path))
}

fn render(config_dir: &Path, values_file: &Path, out: Option<String>) -> Result<()> {
    let store = open_store(config_dir)?;
    let gui = load_gui(config_dir)?;

    let geometry_path = config_dir.join(&gui.geometry_path);
    let specs = load_fields(&geometry_path)
        .with_context(|| format!("loading {}", geometry_path.display()))?;

    let mut registry = Registry::from_specs(specs);
    apply_values(&mut registry, values_file)?;

    let mut renderer = Renderer::new(gui.invoice_width, gui.invoice_height);
    if gui.embed_background {
        let background_path = config_dir.join(&gui.invoice_background_path);
        let background = std::fs::read(&background_path)
            .with_context(|| format!("reading {}", background_path.display()))?;
        renderer = renderer.with_background(background);
    }

    let request = registry.render_request();
    match renderer.render(&request, (gui.page_width, gui.page_height)) {
        Ok(document) => {
            let path = match out {
                Some(name) => store.save_as(&name, document.bytes())?,
                None => store.save(document.bytes())?,
            };
            println!("{}", path.display());
            Ok(())
        }
        Err(RenderError::NothingToRender) => {
            bail!("fill at least one field to generate a document")
        }
        Err(e) => Err(e.into()),
    }
}

/// Apply a `key -> string | boolean` values file to the registry.
///
/// Unknown keys and mismatched kinds are warnings, not failures: a stale
/// values file should not block the fields that do match.
fn apply_values(registry: &mut Registry, path: &Path) -> Result<()> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading values file {}", path.display()))?;
    let values: serde_json::Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing values file {}", path.display()))?;
    let map = values
        .as_object()
        .context("values file must be a JSON object")?;

    for (key, value) in map {
        let result = match value {
            serde_json::Value::String(text) => registry.set_text(key, text),
            serde_json::Value::Bool(state) => registry.set_checked(key, *state),
            other => {
                log::warn!("value for '{key}' must be a string or boolean, got {other}");
                continue;
            }
        };
        if let Err(e) = result {
            log::warn!("{e}");
        }
    }

    Ok(())
}

fn fields(config_dir: &Path) -> Result<()> {
    let gui = load_gui(config_dir)?;
    let geometry_path = config_dir.join(&gui.geometry_path);
    let specs = load_fields(&geometry_path)
        .with_context(|| format!("loading {}", geometry_path.display()))?;

    for spec in &specs {
        println!(
            "{}  {:?}  ({}, {}) {}x{}  max {}  {:?}",
            spec.key,
            spec.kind,
            spec.rect.x,
            spec.rect.y,
            spec.rect.width,
            spec.rect.height,
            spec.max_length,
            spec.alignment,
        );
    }
    Ok(())
}

fn list(config_dir: &Path) -> Result<()> {
    let store = open_store(config_dir)?;
    for name in store.list()? {
        println!("{name}");
    }
    Ok(())
}

fn delete(config_dir: &Path, name: &str) -> Result<()> {
    let store = open_store(config_dir)?;
    store.delete(name)?;
    println!("deleted {name}");
    Ok(())
}

fn print(config_dir: &Path, name: &str) -> Result<()> {
    let store = open_store(config_dir)?;
    shell::print_file(&store.path_of(name))?;
    Ok(())
}

fn open_folder(config_dir: &Path) -> Result<()> {
    let store = open_store(config_dir)?;
    shell::open_folder(store.dir())?;
    Ok(())
}

fn set_path(config_dir: &Path, path: &str) -> Result<()> {
    if !Path::new(path).is_dir() {
        bail!("'{path}' is not an existing directory");
    }
    let mut manager = SettingsManager::load_or_init(settings_path(config_dir))?;
    manager.set_prints_path(path)?;
    println!("documents folder set to {path}");
    Ok(())
}
