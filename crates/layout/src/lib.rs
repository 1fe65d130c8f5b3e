//! Field Layout Engine - geometry-driven invoice filling
//!
//! This crate provides:
//! - Geometry specification parsing (`key -> [x, y, w, h, max_length, kind, alignment?]`)
//! - The field registry: live instances, hot-reload reconciliation,
//!   selection-group exclusivity
//! - The renderer: canvas-space geometry mapped onto a print-ready
//!   document at an arbitrary output size
//!
//! # Example
//!
//! ```ignore
//! use layout::{load_fields, Registry, Renderer};
//!
//! let specs = load_fields("inputs_geometry.json")?;
//! let mut registry = Registry::from_specs(specs);
//! registry.set_text("nombre", "Juan Perez")?;
//! let renderer = Renderer::new(400.0, 500.0);
//! let document = renderer.render(&registry.render_request(), (612.0, 792.0))?;
//! ```

pub mod group;
pub mod parser;
mod registry;
mod renderer;
mod schema;

pub use group::ExclusiveGroups;
pub use parser::{load_fields, parse_fields};
pub use registry::{FieldInstance, FieldValue, Registry};
pub use renderer::{place_mark, place_text, Document, RenderRequest, Renderer};
pub use schema::*;

use thiserror::Error;

/// Errors that can occur while loading a geometry specification
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to read geometry specification: {0}")]
    SpecUnreadable(#[from] std::io::Error),

    #[error("Malformed geometry specification: {0}")]
    MalformedSpec(String),
}

/// Errors from mutating a field through the registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{0}' does not hold text")]
    NotText(String),

    #[error("Field '{0}' is not a toggle")]
    NotToggle(String),
}

/// Errors from rendering a request onto a document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No fields are filled; nothing to render")]
    NothingToRender,

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),
}

/// Result type for specification loading
pub type Result<T> = std::result::Result<T, LayoutError>;
