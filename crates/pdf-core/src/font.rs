//! Built-in (base-14) font support
//!
//! Documents produced here never embed font programs: every PDF reader
//! ships the base-14 set, so a font is just a name, an encoding and a
//! width table. Widths are the Adobe AFM advances in 1/1000 em units and
//! are needed for center/right anchor math.

use lopdf::{dictionary, Dictionary};

/// Helvetica character advances for codes 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30-0x3F
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50-0x5F
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60-0x6F
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70-0x7E
];

/// Helvetica-Bold character advances for codes 0x20..=0x7E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30-0x3F
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50-0x5F
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60-0x6F
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70-0x7E
];

/// One of the PDF built-in fonts used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseFont {
    Helvetica,
    HelveticaBold,
    /// Symbol font carrying the check-mark glyphs (U+2713 / U+2714).
    ZapfDingbats,
}

impl BaseFont {
    /// PostScript name used in the font dictionary.
    pub fn base_name(&self) -> &'static str {
        match self {
            BaseFont::Helvetica => "Helvetica",
            BaseFont::HelveticaBold => "Helvetica-Bold",
            BaseFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Build the Type1 font dictionary for this font.
    ///
    /// The text fonts get WinAnsiEncoding so Latin-1 bytes map to the
    /// expected glyphs; ZapfDingbats keeps its built-in encoding.
    pub fn to_font_dictionary(&self) -> Dictionary {
        match self {
            BaseFont::ZapfDingbats => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => self.base_name(),
            },
            _ => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => self.base_name(),
                "Encoding" => "WinAnsiEncoding",
            },
        }
    }

    /// Encode a string as the hex form used in content streams (`<..> Tj`).
    ///
    /// Characters with no mapping in the font's encoding are replaced by
    /// `?` (text fonts) or dropped (ZapfDingbats).
    pub fn encode_hex(&self, text: &str) -> String {
        let mut hex = String::with_capacity(text.len() * 2 + 2);
        hex.push('<');
        for c in text.chars() {
            let byte = match self {
                BaseFont::ZapfDingbats => match dingbats_byte(c) {
                    Some(b) => b,
                    None => continue,
                },
                _ => winansi_byte(c).unwrap_or(b'?'),
            };
            hex.push_str(&format!("{byte:02X}"));
        }
        hex.push('>');
        hex
    }

    /// Advance width of one character in 1/1000 em.
    fn char_width(&self, c: char) -> u16 {
        let widths = match self {
            BaseFont::Helvetica => &HELVETICA_WIDTHS,
            BaseFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            // Only the check marks are ever measured; both are close to
            // the a47/a48 AFM advances.
            BaseFont::ZapfDingbats => {
                return match dingbats_byte(c) {
                    Some(_) => 790,
                    None => 0,
                };
            }
        };

        let folded = fold_accent(c);
        let code = folded as u32;
        if (0x20..=0x7E).contains(&code) {
            widths[(code - 0x20) as usize]
        } else {
            // Unmapped glyph; use the average lowercase advance so
            // alignment stays sane.
            556
        }
    }

    /// Width of a string in points at the given size.
    pub fn text_width_points(&self, text: &str, size: f32) -> f64 {
        let milli: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        milli as f64 / 1000.0 * size as f64
    }
}

/// WinAnsi (CP1252) code for a character, if the character is encodable.
fn winansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E => Some(code as u8),
        // CP1252 matches Latin-1 in the upper range
        0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '–' => Some(0x96),
            '—' => Some(0x97),
            _ => None,
        },
    }
}

/// ZapfDingbats code for a character.
///
/// The Dingbats encoding maps U+2701..U+27BE sequentially from 0x21.
fn dingbats_byte(c: char) -> Option<u8> {
    let code = c as u32;
    if (0x2701..=0x27BE).contains(&code) {
        Some((0x21 + (code - 0x2701)) as u8)
    } else {
        None
    }
}

/// Map accented Latin-1 letters to their base letter.
///
/// In the Helvetica AFMs the accented variants share the base letter's
/// advance, so folding is exact for the letters and a close approximation
/// for the handful of remaining symbols.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        'ç' => 'c',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        '¿' => '?',
        '¡' => '!',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_names() {
        assert_eq!(BaseFont::Helvetica.base_name(), "Helvetica");
        assert_eq!(BaseFont::HelveticaBold.base_name(), "Helvetica-Bold");
        assert_eq!(BaseFont::ZapfDingbats.base_name(), "ZapfDingbats");
    }

    #[test]
    fn test_encode_hex_ascii() {
        assert_eq!(BaseFont::Helvetica.encode_hex("AB"), "<4142>");
    }

    #[test]
    fn test_encode_hex_latin1() {
        // é is 0xE9 in WinAnsi
        assert_eq!(BaseFont::Helvetica.encode_hex("é"), "<E9>");
        assert_eq!(BaseFont::Helvetica.encode_hex("ñ"), "<F1>");
    }

    #[test]
    fn test_encode_hex_unmappable_becomes_question_mark() {
        assert_eq!(BaseFont::Helvetica.encode_hex("→"), "<3F>");
    }

    #[test]
    fn test_dingbats_check_marks() {
        // U+2713 -> 0x33, U+2714 -> 0x34
        assert_eq!(BaseFont::ZapfDingbats.encode_hex("✓"), "<33>");
        assert_eq!(BaseFont::ZapfDingbats.encode_hex("✔"), "<34>");
    }

    #[test]
    fn test_dingbats_drops_unknown() {
        assert_eq!(BaseFont::ZapfDingbats.encode_hex("a✔"), "<34>");
    }

    #[test]
    fn test_text_width_space() {
        // space advance is 278/1000 em
        let w = BaseFont::Helvetica.text_width_points(" ", 10.0);
        assert!((w - 2.78).abs() < 1e-9);
    }

    #[test]
    fn test_text_width_accented_matches_base() {
        let base = BaseFont::Helvetica.text_width_points("e", 12.0);
        let accented = BaseFont::Helvetica.text_width_points("é", 12.0);
        assert_eq!(base, accented);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = BaseFont::Helvetica.text_width_points("mano", 10.0);
        let bold = BaseFont::HelveticaBold.text_width_points("mano", 10.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_font_dictionary_encoding() {
        let dict = BaseFont::Helvetica.to_font_dictionary();
        assert_eq!(
            dict.get(b"Encoding").unwrap().as_name().unwrap(),
            b"WinAnsiEncoding"
        );

        let dingbats = BaseFont::ZapfDingbats.to_font_dictionary();
        assert!(dingbats.get(b"Encoding").is_err());
    }
}
