//! PDF Core - Print-ready document generation
//!
//! This crate provides functionality for:
//! - Creating blank single-page PDF documents at a given physical size
//! - Drawing aligned text with the PDF built-in (base-14) fonts
//! - Stamping background images (JPEG, PNG)
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, BaseFont, PdfDocument};
//!
//! let mut doc = PdfDocument::new(612.0, 792.0);
//! doc.set_font(BaseFont::Helvetica, 10.0);
//! doc.insert_text("Hello, World!", 100.0, 700.0, Align::Left);
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod image;
mod text;

pub use document::{Color, PdfDocument};
pub use font::BaseFont;
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
