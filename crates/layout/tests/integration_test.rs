//! Integration tests for the field-layout engine
//!
//! These drive the parse -> registry -> render path and inspect the
//! generated document's content stream through lopdf.

use layout::group::PAYMENT_GROUP;
use layout::{
    parse_fields, place_text, Alignment, FieldKind, Registry, RenderError, Renderer,
};

const CANVAS: (f64, f64) = (400.0, 500.0);
const LETTER: (f64, f64) = (612.0, 792.0);

fn content_of(document: &layout::Document) -> String {
    let doc = lopdf::Document::load_mem(document.bytes()).expect("generated PDF unparseable");
    let pages = doc.get_pages();
    let content = doc.get_page_content(pages[&1]).expect("no page content");
    String::from_utf8_lossy(&content).into_owned()
}

#[test]
fn test_scenario_text_anchor_at_letter_size() {
    // spec {"nombre": [10,10,100,20,30,"text","left"]}, canvas 400x500,
    // target 612x792: anchor x = (10+2)*(612/400), y = 792-(10+16)*(792/500)
    let specs = parse_fields(r#"{"nombre": [10, 10, 100, 20, 30, "text", "left"]}"#).unwrap();
    let spec = &specs[0];

    let scale_x = LETTER.0 / CANVAS.0;
    let scale_y = LETTER.1 / CANVAS.1;
    let (x, y, _) = place_text(&spec.rect, spec.alignment, scale_x, scale_y, LETTER.1);

    assert!((x - 18.36).abs() < 0.01);
    assert!((y - 750.83).abs() < 0.05);
    assert_eq!(x, 12.0 * scale_x);
    assert_eq!(y, LETTER.1 - 26.0 * scale_y);
}

#[test]
fn test_rendered_text_lands_at_computed_anchor() {
    let specs = parse_fields(r#"{"nombre": [10, 10, 100, 20, 30, "text", "left"]}"#).unwrap();
    let mut registry = Registry::from_specs(specs.clone());
    registry.set_text("nombre", "Juan Perez").unwrap();

    let renderer = Renderer::new(CANVAS.0, CANVAS.1);
    let document = renderer.render(&registry.render_request(), LETTER).unwrap();

    assert_eq!(document.width(), 612.0);
    assert_eq!(document.height(), 792.0);

    let content = content_of(&document);
    let (x, y, _) = place_text(
        &specs[0].rect,
        specs[0].alignment,
        LETTER.0 / CANVAS.0,
        LETTER.1 / CANVAS.1,
        LETTER.1,
    );
    assert!(content.contains(&format!("{x} {y} Td")));
    // "Juan Perez" in WinAnsi hex
    assert!(content.contains("<4A75616E20506572657A> Tj"));
}

#[test]
fn test_center_alignment_round_trip() {
    // The rendered anchor of a centered field is (x + w/2) * scale_x for
    // any scale
    for target in [(400.0, 500.0), (612.0, 792.0), (1224.0, 1584.0)] {
        let specs =
            parse_fields(r#"{"total": [40, 60, 120, 20, 12, "text", "center"]}"#).unwrap();
        let mut registry = Registry::from_specs(specs);
        registry.set_text("total", "99.50").unwrap();

        let renderer = Renderer::new(CANVAS.0, CANVAS.1);
        let document = renderer.render(&registry.render_request(), target).unwrap();
        let content = content_of(&document);

        let scale_x = target.0 / CANVAS.0;
        let anchor = (40.0 + 60.0) * scale_x;
        // pdf-core shifts the anchor left by half the measured text width
        let mut doc = pdf_core::PdfDocument::new(target.0, target.1);
        doc.set_font(pdf_core::BaseFont::Helvetica, 10.0);
        let shifted = anchor - doc.text_width("99.50") / 2.0;
        let scale_y = target.1 / CANVAS.1;
        let y = target.1 - (60.0 + 16.0) * scale_y;
        assert!(content.contains(&format!("{shifted} {y} Td")));
    }
}

#[test]
fn test_selected_option_is_authoritative_for_group_marks() {
    // Scenario: two payment radios; selecting "tarjeta" must emit exactly
    // one mark, at the tarjeta rectangle, even though efectivo's own
    // boolean was true earlier
    let specs = parse_fields(
        r#"{
            "forma_pago_efectivo": [5, 5, 20, 20, 0, "radio_button"],
            "forma_pago_tarjeta": [5, 30, 20, 20, 0, "radio_button"]
        }"#,
    )
    .unwrap();

    let mut registry = Registry::from_specs(specs);
    registry.set_checked("forma_pago_efectivo", true).unwrap();
    registry.set_checked("forma_pago_tarjeta", true).unwrap();
    assert_eq!(registry.selected(PAYMENT_GROUP), Some("tarjeta"));

    let renderer = Renderer::new(CANVAS.0, CANVAS.1);
    let document = renderer.render(&registry.render_request(), LETTER).unwrap();
    let content = content_of(&document);

    // Exactly one dingbats mark
    assert_eq!(content.matches("<34> Tj").count(), 1);

    // At the tarjeta rectangle (y = 30), not the efectivo one (y = 5)
    let scale_x = LETTER.0 / CANVAS.0;
    let scale_y = LETTER.1 / CANVAS.1;
    let x = (5.0 + 1.0) * scale_x;
    let tarjeta_y = LETTER.1 - (30.0 + 11.0) * scale_y;
    assert!(content.contains(&format!("{x} {tarjeta_y} Td")));
}

#[test]
fn test_group_member_booleans_alone_do_not_render() {
    // A doctored request where a member boolean is true but no option is
    // selected: the member must not be printed
    let specs = parse_fields(
        r#"{"forma_pago_efectivo": [5, 5, 20, 20, 0, "radio_button"]}"#,
    )
    .unwrap();
    let registry = Registry::from_specs(specs);

    let mut request = registry.render_request();
    request.fields[0].value = layout::FieldValue::Checked(true);
    request.selected = None;

    let renderer = Renderer::new(CANVAS.0, CANVAS.1);
    match renderer.render(&request, LETTER) {
        Err(RenderError::NothingToRender) => {}
        other => panic!("expected NothingToRender, got {other:?}"),
    }
}

#[test]
fn test_non_group_toggles_render_marks() {
    let specs = parse_fields(
        r#"{
            "iva_incluido": [200, 80, 20, 20, 0, "checkbox"],
            "urgente": [200, 110, 20, 20, 0, "radio_button"]
        }"#,
    )
    .unwrap();

    let mut registry = Registry::from_specs(specs);
    registry.set_checked("iva_incluido", true).unwrap();
    registry.set_checked("urgente", true).unwrap();

    let renderer = Renderer::new(CANVAS.0, CANVAS.1);
    let document = renderer.render(&registry.render_request(), LETTER).unwrap();
    let content = content_of(&document);

    assert_eq!(content.matches("<34> Tj").count(), 2);
}

#[test]
fn test_blank_everything_yields_nothing_to_render() {
    let specs = parse_fields(
        r#"{
            "nombre": [10, 10, 100, 20, 30, "text"],
            "iva_incluido": [200, 80, 20, 20, 0, "checkbox"]
        }"#,
    )
    .unwrap();

    let mut registry = Registry::from_specs(specs);
    // Whitespace counts as blank
    registry.set_text("nombre", "   ").unwrap();

    let renderer = Renderer::new(CANVAS.0, CANVAS.1);
    match renderer.render(&registry.render_request(), LETTER) {
        Err(RenderError::NothingToRender) => {}
        other => panic!("expected NothingToRender, got {other:?}"),
    }
}

#[test]
fn test_unknown_kind_survives_load_and_render() {
    // Scenario: an unknown kind is skipped silently, everything else works
    let specs = parse_fields(
        r#"{
            "nombre": [10, 10, 100, 20, 30, "text"],
            "misterio": [10, 40, 100, 20, 0, "unknown_type"]
        }"#,
    )
    .unwrap();

    assert_eq!(specs.len(), 1);
    assert!(specs.iter().all(|s| s.kind == FieldKind::Text));

    let mut registry = Registry::from_specs(specs);
    registry.set_text("nombre", "Ana").unwrap();

    let renderer = Renderer::new(CANVAS.0, CANVAS.1);
    assert!(renderer.render(&registry.render_request(), LETTER).is_ok());
}

#[test]
fn test_render_is_deterministic() {
    let specs = parse_fields(
        r#"{
            "nombre": [10, 10, 100, 20, 30, "text", "center"],
            "forma_pago_tarjeta": [5, 30, 20, 20, 0, "radio_button"]
        }"#,
    )
    .unwrap();

    let mut registry = Registry::from_specs(specs);
    registry.set_text("nombre", "Juan Pérez").unwrap();
    registry.set_checked("forma_pago_tarjeta", true).unwrap();

    let renderer = Renderer::new(CANVAS.0, CANVAS.1);
    let request = registry.render_request();

    let first = renderer.render(&request, LETTER).unwrap();
    let second = renderer.render(&request, LETTER).unwrap();
    assert_eq!(first.bytes(), second.bytes());
}

#[test]
fn test_values_survive_a_spec_file_reload() {
    let specs = parse_fields(r#"{"nombre": [10, 10, 100, 20, 30, "text"]}"#).unwrap();
    let mut registry = Registry::from_specs(specs);
    registry.set_text("nombre", "Juan Perez").unwrap();

    let moved = parse_fields(r#"{"nombre": [80, 200, 100, 20, 30, "text", "right"]}"#).unwrap();
    registry.reconcile(moved);

    let field = registry.get("nombre").unwrap();
    assert_eq!(field.value.as_text(), Some("Juan Perez"));
    assert_eq!(field.spec.rect.y, 200.0);
    assert_eq!(field.spec.alignment, Alignment::Right);
}
