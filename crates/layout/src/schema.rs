//! Geometry specification schema types

use serde::{Deserialize, Serialize};

/// Kind of interactive field placed over the invoice background
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Checkbox,
    RadioButton,
}

impl FieldKind {
    /// Parse the wire token (`"text"`, `"checkbox"`, `"radio_button"`).
    ///
    /// Returns `None` for anything else; unrecognized kinds cause the
    /// entry to be skipped, not the whole load to fail.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "text" => Some(FieldKind::Text),
            "checkbox" => Some(FieldKind::Checkbox),
            "radio_button" => Some(FieldKind::RadioButton),
            _ => None,
        }
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Parse the wire token; unrecognized tokens fall back to `Left`.
    pub fn parse(token: &str) -> Self {
        match token {
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::Left,
        }
    }
}

impl From<Alignment> for pdf_core::Align {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Left => pdf_core::Align::Left,
            Alignment::Center => pdf_core::Align::Center,
            Alignment::Right => pdf_core::Align::Right,
        }
    }
}

/// Field rectangle in canvas pixel space, top-left origin
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Whether the rectangle lies inside a canvas of the given size
    pub fn within(&self, canvas_width: f64, canvas_height: f64) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= canvas_width
            && self.y + self.height <= canvas_height
    }
}

/// One entry of the geometry specification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    /// Unique, session-stable identifier
    pub key: String,

    /// Placement on the editor canvas
    pub rect: Rect,

    /// Maximum character count; meaningful only for text fields
    pub max_length: usize,

    /// Field kind
    pub kind: FieldKind,

    /// Text alignment; meaningful only for text fields
    #[serde(default)]
    pub alignment: Alignment,
}
