//! Persistence codec for [`ComparisonSettings`].
//!
//! The persisted form is a flat key-value document. Decoding is
//! forward-compatible and never fails on a structurally valid document:
//! missing keys take their documented defaults, unknown enum tokens fall
//! back to safe values, and unknown keys are ignored. There is no schema
//! versioning — older and newer documents decode identically wherever
//! their field sets overlap.

use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::Point;
use crate::foundation::error::{ReframeError, ReframeResult};
use crate::catalog::model::ComparisonLayout;
use crate::overlay::model::OverlayId;
use crate::settings::model::{
    Background, ComparisonSettings, DateAlignment, ExportAspect, PhotoShape,
};
use crate::stats::engine::{StatCategory, default_categories};

/// The flat persisted document. Every enumerated value is stored by its
/// stable string key; overlay positions appear only when explicitly
/// placed (absence decodes to the sentinel, not `(0, 0)`).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SettingsDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_logo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_dates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_stats: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_photo_weights: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_ai_summary: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_dx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_dy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_position: Option<[f64; 2]>,
    /// Chip index (as a string, JSON object keys) to `[x, y]`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub date_positions: BTreeMap<String, [f64; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_stat_categories: Option<Vec<String>>,

    /// Date-label alignment token: `left` / `center` / `right`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squircle_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_border_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_spacing: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
}

pub fn encode(settings: &ComparisonSettings) -> SettingsDoc {
    let mut doc = SettingsDoc {
        layout: Some(settings.layout.id().to_string()),
        show_logo: Some(settings.show_logo),
        show_dates: Some(settings.show_dates),
        show_stats: Some(settings.show_stats),
        show_photo_weights: Some(settings.show_photo_weights),
        show_ai_summary: Some(settings.show_ai_summary),
        enabled_stat_categories: Some(
            settings
                .enabled_categories
                .iter()
                .map(|c| c.id().to_string())
                .collect(),
        ),
        date_position: Some(settings.date_alignment.id().to_string()),
        photo_shape: Some(settings.style.shape.id().to_string()),
        squircle_radius: Some(settings.style.squircle_radius),
        photo_border_enabled: Some(settings.style.border_enabled),
        photo_border_color: Some(settings.style.border_color.clone()),
        photo_border_width: Some(settings.style.border_width),
        photo_spacing: Some(settings.style.spacing),
        export_aspect_ratio: Some(settings.aspect.id().to_string()),
        background_color: Some(settings.background.token()),
        ai_summary: settings.summary_text.clone(),
        ..SettingsDoc::default()
    };

    for (id, p) in settings.positions.iter() {
        match id {
            OverlayId::Logo => {
                doc.logo_dx = Some(p.x);
                doc.logo_dy = Some(p.y);
            }
            OverlayId::StatsBar => doc.stats_position = Some([p.x, p.y]),
            OverlayId::DateChip(index) => {
                doc.date_positions.insert(index.to_string(), [p.x, p.y]);
            }
        }
    }

    doc
}

/// Reconstructs settings from a persisted document. Infallible by
/// design: everything unknown or missing normalizes to defaults.
pub fn decode(doc: &SettingsDoc) -> ComparisonSettings {
    let mut settings = ComparisonSettings::default();

    if let Some(layout) = doc.layout.as_deref().and_then(ComparisonLayout::from_id) {
        settings.layout = layout;
    }

    settings.show_logo = doc.show_logo.unwrap_or(settings.show_logo);
    settings.show_dates = doc.show_dates.unwrap_or(settings.show_dates);
    settings.show_stats = doc.show_stats.unwrap_or(settings.show_stats);
    settings.show_photo_weights = doc
        .show_photo_weights
        .unwrap_or(settings.show_photo_weights);
    settings.show_ai_summary = doc.show_ai_summary.unwrap_or(settings.show_ai_summary);

    if let (Some(dx), Some(dy)) = (doc.logo_dx, doc.logo_dy) {
        settings.positions.restore(OverlayId::Logo, Point::new(dx, dy));
    }
    if let Some([x, y]) = doc.stats_position {
        settings
            .positions
            .restore(OverlayId::StatsBar, Point::new(x, y));
    }
    for (key, &[x, y]) in &doc.date_positions {
        // Non-numeric chip keys come from future documents; skip them.
        if let Ok(index) = key.parse::<usize>() {
            settings
                .positions
                .restore(OverlayId::DateChip(index), Point::new(x, y));
        }
    }

    settings.enabled_categories = decode_categories(doc.enabled_stat_categories.as_deref());

    if let Some(align) = doc.date_position.as_deref().and_then(DateAlignment::from_id) {
        settings.date_alignment = align;
    }
    if let Some(shape) = doc.photo_shape.as_deref().and_then(PhotoShape::from_id) {
        settings.style.shape = shape;
    }
    if let Some(radius) = doc.squircle_radius {
        settings.style.squircle_radius = radius;
    }
    if let Some(enabled) = doc.photo_border_enabled {
        settings.style.border_enabled = enabled;
    }
    if let Some(color) = &doc.photo_border_color {
        settings.style.border_color = color.clone();
    }
    if let Some(width) = doc.photo_border_width {
        settings.style.border_width = width;
    }
    if let Some(spacing) = doc.photo_spacing {
        settings.style.spacing = spacing;
    }
    if let Some(aspect) = doc
        .export_aspect_ratio
        .as_deref()
        .and_then(ExportAspect::from_id)
    {
        settings.aspect = aspect;
    }
    if let Some(token) = doc.background_color.as_deref() {
        settings.background = Background::from_token(token);
    }
    settings.summary_text = doc.ai_summary.clone();

    settings
}

/// Missing list, or a list that decodes to nothing recognizable, falls
/// back to the default enabled set.
fn decode_categories(ids: Option<&[String]>) -> BTreeSet<StatCategory> {
    let Some(ids) = ids else {
        return default_categories();
    };
    let decoded: BTreeSet<StatCategory> = ids
        .iter()
        .filter_map(|id| StatCategory::from_id(id))
        .collect();
    if decoded.is_empty() {
        default_categories()
    } else {
        decoded
    }
}

pub fn encode_json(settings: &ComparisonSettings) -> ReframeResult<String> {
    serde_json::to_string_pretty(&encode(settings)).map_err(|e| ReframeError::serde(e.to_string()))
}

/// Errors only on malformed JSON itself; unknown fields and unknown
/// tokens inside a well-formed document are normalized, not rejected.
pub fn decode_json(json: &str) -> ReframeResult<ComparisonSettings> {
    let doc: SettingsDoc =
        serde_json::from_str(json).map_err(|e| ReframeError::serde(e.to_string()))?;
    Ok(decode(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::{Rect, Size};

    #[test]
    fn roundtrip_preserves_explicit_positions() {
        let mut settings = ComparisonSettings::default();
        settings.layout = ComparisonLayout::Timeline;
        settings.aspect = ExportAspect::Story;
        settings.date_alignment = DateAlignment::Right;
        settings.style.border_enabled = true;
        settings.background = Background::Gradient("sunset".to_string());
        settings.summary_text = Some("Three months of steady progress.".to_string());
        settings.enabled_categories = StatCategory::ALL.into_iter().collect();

        let bounds = Rect::new(0.0, 0.0, 1080.0, 1350.0);
        let chip = Size::new(120.0, 28.0);
        settings
            .positions
            .place(OverlayId::DateChip(0), Point::new(24.0, 1180.0), bounds, chip);
        settings
            .positions
            .place(OverlayId::DateChip(1), Point::new(580.0, 1180.0), bounds, chip);
        settings
            .positions
            .place(OverlayId::Logo, Point::new(12.0, 12.0), bounds, chip);

        let decoded = decode(&encode(&settings));
        assert_eq!(decoded, settings);
    }

    #[test]
    fn missing_keys_decode_to_defaults() {
        let decoded = decode(&SettingsDoc::default());
        assert_eq!(decoded, ComparisonSettings::default());
    }

    #[test]
    fn missing_category_list_defaults_to_duration_and_weight() {
        let doc = SettingsDoc {
            layout: Some("triptych".to_string()),
            ..SettingsDoc::default()
        };
        let decoded = decode(&doc);
        assert_eq!(decoded.enabled_categories, default_categories());
        assert_eq!(decoded.layout, ComparisonLayout::Triptych);
    }

    #[test]
    fn empty_or_unknown_category_list_falls_back() {
        let doc = SettingsDoc {
            enabled_stat_categories: Some(vec![]),
            ..SettingsDoc::default()
        };
        assert_eq!(decode(&doc).enabled_categories, default_categories());

        let doc = SettingsDoc {
            enabled_stat_categories: Some(vec!["telepathy".to_string()]),
            ..SettingsDoc::default()
        };
        assert_eq!(decode(&doc).enabled_categories, default_categories());
    }

    #[test]
    fn unknown_enum_tokens_fall_back_without_error() {
        let doc = SettingsDoc {
            layout: Some("hexagon_wall".to_string()),
            photo_shape: Some("dodecahedron".to_string()),
            export_aspect_ratio: Some("21:9".to_string()),
            date_position: Some("diagonal".to_string()),
            background_color: Some("plaid".to_string()),
            ..SettingsDoc::default()
        };
        let decoded = decode(&doc);
        assert_eq!(decoded.layout, ComparisonLayout::SideBySide);
        assert_eq!(decoded.style.shape, PhotoShape::Rounded);
        assert_eq!(decoded.aspect, ExportAspect::Portrait);
        assert_eq!(decoded.date_alignment, DateAlignment::Center);
        assert_eq!(decoded.background, Background::default());
    }

    #[test]
    fn absent_positions_stay_sentinel() {
        let decoded = decode(&SettingsDoc::default());
        assert!(decoded.positions.is_empty());
        assert!(!decoded.positions.is_explicit(OverlayId::StatsBar));
    }

    #[test]
    fn unknown_json_keys_are_ignored() {
        let json = r#"{
            "layout": "slider",
            "holo_mode": true,
            "chip_theme": "neon",
            "stats_position": [12.0, 900.0]
        }"#;
        let decoded = decode_json(json).unwrap();
        assert_eq!(decoded.layout, ComparisonLayout::Slider);
        assert_eq!(
            decoded.positions.get(OverlayId::StatsBar),
            Some(Point::new(12.0, 900.0))
        );

        assert!(decode_json("{not json").is_err());
    }
}
