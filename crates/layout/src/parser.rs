//! Geometry specification parsing
//!
//! The wire format is a JSON object mapping each field key to a
//! fixed-order array: `[x, y, width, height, max_length, kind, alignment?]`.

use crate::{Alignment, FieldKind, FieldSpec, LayoutError, Rect, Result};
use log::warn;
use serde_json::Value;
use std::path::Path;

/// Parse a geometry specification from a JSON string.
///
/// A document that is not valid JSON or not a top-level object fails
/// the whole load. Individual entries that cannot be understood (not
/// an array, fewer than six values, non-numeric geometry, unrecognized
/// kind) are skipped with a warning so one bad entry cannot take the
/// rest of the layout down.
pub fn parse_fields(json: &str) -> Result<Vec<FieldSpec>> {
    let root: Value =
        serde_json::from_str(json).map_err(|e| LayoutError::MalformedSpec(e.to_string()))?;

    let map = root
        .as_object()
        .ok_or_else(|| LayoutError::MalformedSpec("expected a top-level object".to_string()))?;

    let mut specs = Vec::with_capacity(map.len());
    for (key, entry) in map {
        if let Some(spec) = parse_entry(key, entry) {
            specs.push(spec);
        }
    }

    Ok(specs)
}

/// Read and parse a geometry specification file.
pub fn load_fields<P: AsRef<Path>>(path: P) -> Result<Vec<FieldSpec>> {
    let json = std::fs::read_to_string(path)?;
    parse_fields(&json)
}

/// Parse a single `key -> [x, y, w, h, max_length, kind, alignment?]` entry.
fn parse_entry(key: &str, entry: &Value) -> Option<FieldSpec> {
    let values = match entry.as_array() {
        Some(values) => values,
        None => {
            warn!("geometry entry '{key}' is not an array; skipped");
            return None;
        }
    };

    if values.len() < 6 {
        warn!(
            "geometry entry '{key}' has {} of 6 required values; skipped",
            values.len()
        );
        return None;
    }

    let geometry: Option<Vec<f64>> = values[..4].iter().map(Value::as_f64).collect();
    let geometry = match geometry {
        Some(geometry) => geometry,
        None => {
            warn!("geometry entry '{key}' has non-numeric coordinates; skipped");
            return None;
        }
    };

    let max_length = match values[4].as_u64() {
        Some(max_length) => max_length as usize,
        None => {
            warn!("geometry entry '{key}' has a non-numeric max length; skipped");
            return None;
        }
    };

    let kind_token = values[5].as_str().unwrap_or_default();
    let kind = match FieldKind::parse(kind_token) {
        Some(kind) => kind,
        None => {
            warn!("geometry entry '{key}' has unrecognized kind '{kind_token}'; skipped");
            return None;
        }
    };

    // Unrecognized alignment tokens fall back to Left
    let alignment = values
        .get(6)
        .and_then(Value::as_str)
        .map(Alignment::parse)
        .unwrap_or_default();

    Some(FieldSpec {
        key: key.to_string(),
        rect: Rect {
            x: geometry[0],
            y: geometry[1],
            width: geometry[2],
            height: geometry[3],
        },
        max_length,
        kind,
        alignment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_text_field() {
        let specs =
            parse_fields(r#"{"nombre": [10, 10, 100, 20, 30, "text", "left"]}"#).unwrap();

        assert_eq!(specs.len(), 1);
        let spec = &specs[0];
        assert_eq!(spec.key, "nombre");
        assert_eq!(spec.rect.x, 10.0);
        assert_eq!(spec.rect.width, 100.0);
        assert_eq!(spec.max_length, 30);
        assert_eq!(spec.kind, FieldKind::Text);
        assert_eq!(spec.alignment, Alignment::Left);
    }

    #[test]
    fn test_alignment_optional_defaults_left() {
        let specs = parse_fields(r#"{"total": [5, 5, 60, 20, 12, "text"]}"#).unwrap();
        assert_eq!(specs[0].alignment, Alignment::Left);
    }

    #[test]
    fn test_unknown_alignment_token_falls_back_to_left() {
        let specs =
            parse_fields(r#"{"total": [5, 5, 60, 20, 12, "text", "justified"]}"#).unwrap();
        assert_eq!(specs[0].alignment, Alignment::Left);
    }

    #[test]
    fn test_unknown_kind_is_skipped_not_fatal() {
        let specs = parse_fields(
            r#"{
                "good": [10, 10, 100, 20, 30, "text"],
                "bad": [10, 40, 100, 20, 0, "unknown_type"]
            }"#,
        )
        .unwrap();

        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].key, "good");
    }

    #[test]
    fn test_short_entry_is_skipped() {
        let specs = parse_fields(
            r#"{
                "short": [10, 10, 100],
                "good": [10, 40, 100, 20, 0, "checkbox"]
            }"#,
        )
        .unwrap();

        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].key, "good");
    }

    #[test]
    fn test_non_array_entry_is_skipped() {
        let specs = parse_fields(
            r#"{
                "odd": {"x": 1},
                "good": [10, 40, 100, 20, 0, "checkbox"]
            }"#,
        )
        .unwrap();

        assert_eq!(specs.len(), 1);
    }

    #[test]
    fn test_unreadable_document_fails_the_load() {
        assert!(parse_fields("not json").is_err());
        assert!(parse_fields("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_radio_button_entry() {
        let specs =
            parse_fields(r#"{"forma_pago_efectivo": [5, 5, 20, 20, 0, "radio_button"]}"#)
                .unwrap();
        assert_eq!(specs[0].kind, FieldKind::RadioButton);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_fields("/nonexistent/inputs_geometry.json").is_err());
    }
}
