use reframe::{
    Background, ComparisonLayout, DateAlignment, ExportAspect, OverlayId, PhotoShape, Point,
    StatCategory,
};

#[test]
fn fixture_with_unknown_fields_decodes() {
    let s = include_str!("data/settings_doc.json");
    let settings = reframe::decode_json(s).unwrap();

    assert_eq!(settings.layout, ComparisonLayout::Timeline);
    assert!(!settings.show_logo);
    assert!(settings.show_stats);
    assert_eq!(settings.date_alignment, DateAlignment::Right);
    assert_eq!(settings.style.shape, PhotoShape::Squircle);
    assert_eq!(settings.style.squircle_radius, 32.0);
    assert_eq!(settings.aspect, ExportAspect::Story);
    assert_eq!(settings.background, Background::Gradient("dawn".to_string()));
    assert_eq!(settings.enabled_categories.len(), 3);
    assert!(settings.enabled_categories.contains(&StatCategory::Body));

    assert_eq!(
        settings.positions.get(OverlayId::DateChip(0)),
        Some(Point::new(24.0, 1180.0))
    );
    assert_eq!(
        settings.positions.get(OverlayId::DateChip(1)),
        Some(Point::new(560.0, 1180.0))
    );
    assert_eq!(
        settings.positions.get(OverlayId::StatsBar),
        Some(Point::new(0.0, 820.0))
    );
    // Never persisted, so still the sentinel.
    assert!(!settings.positions.is_explicit(OverlayId::Logo));
}

#[test]
fn fixture_survives_a_full_roundtrip() {
    let s = include_str!("data/settings_doc.json");
    let settings = reframe::decode_json(s).unwrap();

    let encoded = reframe::encode_json(&settings).unwrap();
    let again = reframe::decode_json(&encoded).unwrap();
    assert_eq!(again, settings);
}

#[test]
fn empty_document_is_all_defaults() {
    let settings = reframe::decode_json("{}").unwrap();
    assert_eq!(settings, reframe::ComparisonSettings::default());
    assert_eq!(settings.enabled_categories, reframe::default_categories());
}
