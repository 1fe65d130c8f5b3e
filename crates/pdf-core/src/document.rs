//! PDF Document builder

use crate::image::{generate_image_operators, ImageXObject};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, BaseFont, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Builder for a fresh single-page PDF document.
///
/// Unlike form-filling engines that open an existing template file, the
/// documents produced here start blank: the page carries only what the
/// caller draws onto it. All coordinates are PDF points with the origin
/// at the bottom-left corner of the page.
///
/// Content operators are buffered and flushed into the page's content
/// stream when the document is saved; `save`/`to_bytes` therefore consume
/// the buffered content and should be called once.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// The single page object
    page_id: ObjectId,
    /// Page width in points
    width: f64,
    /// Page height in points
    height: f64,
    /// Current font
    current_font: BaseFont,
    /// Current font size
    current_size: f32,
    /// Current text color
    current_color: Color,
    /// Registered fonts (font -> resource name), in registration order
    font_resources: Vec<(BaseFont, String)>,
    /// Next font resource number
    next_font_resource: u32,
    /// Registered images (resource name -> PDF object ID)
    image_resources: Vec<(String, ObjectId)>,
    /// Next image resource number
    next_image_resource: u32,
    /// Buffered content operators for the page
    content: Vec<u8>,
}

impl PdfDocument {
    /// Create a blank document with a single page of the given size.
    ///
    /// # Arguments
    /// * `width` - Page width in points
    /// * `height` - Page height in points
    pub fn new(width: f64, height: f64) -> Self {
        let mut inner = Document::with_version("1.4");

        let pages_id = inner.add_object(Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => 1,
            "Kids" => vec![], // Updated below once the page exists
        }));

        let page_id = inner.add_object(Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        }));

        let mut pages_dict = inner
            .get_object(pages_id)
            .and_then(Object::as_dict)
            .cloned()
            .unwrap_or_default();
        pages_dict.set("Kids", Object::Array(vec![page_id.into()]));
        inner.objects.insert(pages_id, pages_dict.into());

        let catalog_id = inner.add_object(Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }));
        inner.trailer.set("Root", catalog_id);

        Self {
            inner,
            page_id,
            width,
            height,
            current_font: BaseFont::Helvetica,
            current_size: 12.0,
            current_color: Color::default(),
            font_resources: Vec::new(),
            next_font_resource: 1,
            image_resources: Vec::new(),
            next_image_resource: 1,
            content: Vec::new(),
        }
    }

    /// Page width in points
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Page height in points
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Set the current font and size
    pub fn set_font(&mut self, font: BaseFont, size: f32) {
        self.current_font = font;
        self.current_size = size;
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_color = color;
    }

    /// Width of `text` in points under the current font and size
    pub fn text_width(&self, text: &str) -> f64 {
        self.current_font.text_width_points(text, self.current_size)
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `x` - Anchor X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from the bottom)
    /// * `align` - How the text hangs off the anchor: `Left` draws to the
    ///   right of it, `Center` straddles it, `Right` draws to the left
    pub fn insert_text(&mut self, text: &str, x: f64, y: f64, align: Align) {
        // Nothing to render
        if text.is_empty() {
            return;
        }

        let text_width = self.current_font.text_width_points(text, self.current_size);
        let font_resource_name = self.get_or_create_font_ref(self.current_font);
        let text_hex = self.current_font.encode_hex(text);

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_size,
            text_width,
            color: self.current_color,
        };

        let operators = generate_text_operators(&text_hex, x, y, align, &ctx);
        self.content.extend_from_slice(&operators);
    }

    /// Insert an image at a specific position
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `x` - X coordinate in points (bottom-left corner of the image)
    /// * `y` - Y coordinate in points
    /// * `width` - Displayed width in points
    /// * `height` - Displayed height in points
    pub fn insert_image(
        &mut self,
        data: &[u8],
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        let xobject = ImageXObject::from_bytes(data)?;
        let object_id = self.inner.add_object(xobject.to_pdf_stream());

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        self.image_resources.push((resource_name.clone(), object_id));

        let operators = generate_image_operators(&resource_name, x, y, width, height);
        self.content.extend_from_slice(&operators);

        Ok(())
    }

    /// Stamp an image over the entire page, behind nothing that has been
    /// drawn yet. Call before any text insertion.
    pub fn stamp_background(&mut self, data: &[u8]) -> Result<()> {
        self.insert_image(data, 0.0, 0.0, self.width, self.height)
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize();
        self.inner
            .save(path)
            .map_err(|e| crate::PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize();
        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| crate::PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Get or create a font resource reference
    ///
    /// Returns the resource name (e.g., "F1") for use in content streams.
    fn get_or_create_font_ref(&mut self, font: BaseFont) -> String {
        if let Some((_, name)) = self.font_resources.iter().find(|(f, _)| *f == font) {
            return name.clone();
        }

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        self.font_resources.push((font, resource_name.clone()));
        resource_name
    }

    /// Flush the buffered content and wire up the page resources.
    ///
    /// Font dictionaries are created here, after all insertions, so the
    /// object numbering (and therefore the output bytes) depends only on
    /// the sequence of drawing calls.
    fn finalize(&mut self) {
        let mut font_dict = Dictionary::new();
        for (font, resource_name) in std::mem::take(&mut self.font_resources) {
            let font_id = self.inner.add_object(font.to_font_dictionary());
            font_dict.set(resource_name.as_bytes(), Object::Reference(font_id));
        }

        let mut xobject_dict = Dictionary::new();
        for (resource_name, object_id) in std::mem::take(&mut self.image_resources) {
            xobject_dict.set(resource_name.as_bytes(), Object::Reference(object_id));
        }

        let mut resources = Dictionary::new();
        if !font_dict.is_empty() {
            resources.set("Font", Object::Dictionary(font_dict));
        }
        if !xobject_dict.is_empty() {
            resources.set("XObject", Object::Dictionary(xobject_dict));
        }

        let content = std::mem::take(&mut self.content);
        let contents_id = self
            .inner
            .add_object(Object::Stream(Stream::new(Dictionary::new(), content)));

        let mut page_dict = self
            .inner
            .get_object(self.page_id)
            .and_then(Object::as_dict)
            .cloned()
            .unwrap_or_default();
        page_dict.set("Resources", Object::Dictionary(resources));
        page_dict.set("Contents", Object::Reference(contents_id));
        self.inner.objects.insert(self.page_id, page_dict.into());
    }
}
