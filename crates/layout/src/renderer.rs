//! Coordinate transform & document renderer
//!
//! Field rectangles live in editor-canvas pixel space (top-left origin);
//! the output document lives in physical points (bottom-left origin).
//! One pair of scale factors maps every field onto the geometrically
//! corresponding point of the page, whatever output size is requested,
//! so the on-screen editor and the printed artifact stay aligned.

use crate::group::{group_of, PAYMENT_GROUP_PREFIX};
use crate::registry::{FieldInstance, FieldValue};
use crate::schema::{Alignment, FieldKind, Rect};
use crate::RenderError;
use log::warn;
use pdf_core::{Align, BaseFont, PdfDocument};

/// Baseline drop for body text, in canvas units, so the glyph baseline
/// lands inside the field rectangle instead of at its top edge.
const TEXT_BASELINE_DROP: f64 = 16.0;
/// Baseline drop for check marks.
const MARK_BASELINE_DROP: f64 = 11.0;
/// Horizontal inset keeping text off the field border.
const TEXT_INSET: f64 = 2.0;
/// Horizontal inset for check marks.
const MARK_INSET: f64 = 1.0;
/// Body text size in points.
const BODY_FONT_SIZE: f32 = 10.0;
/// Check-mark size in points.
const MARK_FONT_SIZE: f32 = 14.0;
/// The mark glyph (HEAVY CHECK MARK).
const CHECK_MARK: &str = "\u{2714}";

/// Everything one render action needs, captured at request time: the
/// full field set with current values plus the selection-group slot.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub fields: Vec<FieldInstance>,
    pub selected: Option<String>,
}

/// A finished, immutable print-ready document.
///
/// The caller decides where (and under what name) it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    bytes: Vec<u8>,
    width: f64,
    height: f64,
}

impl Document {
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Page width in points
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Page height in points
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Maps canvas-space field geometry onto documents of arbitrary size.
pub struct Renderer {
    canvas_width: f64,
    canvas_height: f64,
    background: Option<Vec<u8>>,
}

impl Renderer {
    /// Create a renderer for the given editor canvas size (pixels).
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            background: None,
        }
    }

    /// Stamp this image (JPEG or PNG bytes) across the full page under
    /// the filled values. Useful when printing on plain paper instead of
    /// pre-printed forms.
    pub fn with_background(mut self, data: Vec<u8>) -> Self {
        self.background = Some(data);
        self
    }

    /// Render a request onto a `(width, height)`-point document.
    ///
    /// Only filled fields produce output: text fields with a non-blank
    /// trimmed value, toggles that are set. Selection-group members
    /// follow the request's selected option; their own booleans are
    /// ignored here. If nothing at all is filled no document is produced
    /// and `NothingToRender` is returned.
    pub fn render(
        &self,
        request: &RenderRequest,
        target: (f64, f64),
    ) -> std::result::Result<Document, RenderError> {
        let (width, height) = target;
        let scale_x = width / self.canvas_width;
        let scale_y = height / self.canvas_height;

        let mut doc = PdfDocument::new(width, height);
        if let Some(background) = &self.background {
            doc.stamp_background(background)?;
        }

        let mut filled = 0usize;

        for field in &request.fields {
            if !field.spec.rect.within(self.canvas_width, self.canvas_height) {
                warn!(
                    "field '{}' lies outside the {}x{} canvas",
                    field.spec.key, self.canvas_width, self.canvas_height
                );
            }

            // Group members are decided by the selection slot below
            if field.spec.kind == FieldKind::RadioButton && group_of(&field.spec.key).is_some() {
                continue;
            }

            match &field.value {
                FieldValue::Text(text) => {
                    let value = text.trim();
                    if value.is_empty() {
                        continue;
                    }
                    let (x, y, align) =
                        place_text(&field.spec.rect, field.spec.alignment, scale_x, scale_y, height);
                    doc.set_font(BaseFont::Helvetica, BODY_FONT_SIZE);
                    doc.insert_text(value, x, y, align);
                    filled += 1;
                }
                FieldValue::Checked(true) => {
                    draw_mark(&mut doc, &field.spec.rect, scale_x, scale_y, height);
                    filled += 1;
                }
                FieldValue::Checked(false) => {}
            }
        }

        // The slot is authoritative: exactly the selected member's mark
        // is printed, whatever the member booleans claim.
        if let Some(option) = &request.selected {
            let member_key = format!("{PAYMENT_GROUP_PREFIX}{option}");
            match request.fields.iter().find(|f| f.spec.key == member_key) {
                Some(member) => {
                    draw_mark(&mut doc, &member.spec.rect, scale_x, scale_y, height);
                    filled += 1;
                }
                None => warn!("selected option '{option}' has no field '{member_key}'"),
            }
        }

        if filled == 0 {
            return Err(RenderError::NothingToRender);
        }

        let bytes = doc.to_bytes()?;
        Ok(Document {
            bytes,
            width,
            height,
        })
    }
}

/// Anchor point and alignment for a text value.
///
/// The rectangle's top-left `y` becomes a bottom-origin baseline via
/// `target_height - (y + drop) * scale_y`; the anchor `x` depends on the
/// field's alignment (2-unit inset on the left/right edges, midpoint for
/// centered fields).
pub fn place_text(
    rect: &Rect,
    alignment: Alignment,
    scale_x: f64,
    scale_y: f64,
    target_height: f64,
) -> (f64, f64, Align) {
    let y = target_height - (rect.y + TEXT_BASELINE_DROP) * scale_y;
    let anchor = match alignment {
        Alignment::Left => rect.x + TEXT_INSET,
        Alignment::Center => rect.x + rect.width / 2.0,
        Alignment::Right => rect.x + rect.width - TEXT_INSET,
    };
    (anchor * scale_x, y, alignment.into())
}

/// Anchor point for a check mark (always left-anchored).
pub fn place_mark(rect: &Rect, scale_x: f64, scale_y: f64, target_height: f64) -> (f64, f64) {
    (
        (rect.x + MARK_INSET) * scale_x,
        target_height - (rect.y + MARK_BASELINE_DROP) * scale_y,
    )
}

fn draw_mark(doc: &mut PdfDocument, rect: &Rect, scale_x: f64, scale_y: f64, target_height: f64) {
    let (x, y) = place_mark(rect, scale_x, scale_y, target_height);
    doc.set_font(BaseFont::ZapfDingbats, MARK_FONT_SIZE);
    doc.insert_text(CHECK_MARK, x, y, Align::Left);
}
