//! The full persisted configuration of one comparison composite.
//!
//! Every enumerated field carries a stable string key used by the
//! settings codec; catalog reordering must never corrupt persisted
//! documents.

use std::collections::BTreeSet;

use crate::catalog::model::ComparisonLayout;
use crate::overlay::model::OverlayPositions;
use crate::stats::engine::{StatCategory, default_categories};

/// Corner treatment applied to every photo slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoShape {
    Sharp,
    #[default]
    Rounded,
    Squircle,
}

impl PhotoShape {
    pub fn id(self) -> &'static str {
        match self {
            PhotoShape::Sharp => "sharp",
            PhotoShape::Rounded => "rounded",
            PhotoShape::Squircle => "squircle",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "sharp" => Some(PhotoShape::Sharp),
            "rounded" => Some(PhotoShape::Rounded),
            "squircle" => Some(PhotoShape::Squircle),
            _ => None,
        }
    }
}

/// Horizontal alignment of date chips within their segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl DateAlignment {
    pub fn id(self) -> &'static str {
        match self {
            DateAlignment::Left => "left",
            DateAlignment::Center => "center",
            DateAlignment::Right => "right",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "left" => Some(DateAlignment::Left),
            "center" => Some(DateAlignment::Center),
            "right" => Some(DateAlignment::Right),
            _ => None,
        }
    }
}

/// Export aspect ratio the capture collaborator renders at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportAspect {
    /// 1:1.
    Square,
    /// 4:5 feed portrait.
    #[default]
    Portrait,
    /// 9:16 story.
    Story,
    /// 16:9.
    Landscape,
}

impl ExportAspect {
    pub fn id(self) -> &'static str {
        match self {
            ExportAspect::Square => "square",
            ExportAspect::Portrait => "portrait",
            ExportAspect::Story => "story",
            ExportAspect::Landscape => "landscape",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "square" => Some(ExportAspect::Square),
            "portrait" => Some(ExportAspect::Portrait),
            "story" => Some(ExportAspect::Story),
            "landscape" => Some(ExportAspect::Landscape),
            _ => None,
        }
    }

    /// Width over height.
    pub fn ratio(self) -> f64 {
        match self {
            ExportAspect::Square => 1.0,
            ExportAspect::Portrait => 4.0 / 5.0,
            ExportAspect::Story => 9.0 / 16.0,
            ExportAspect::Landscape => 16.0 / 9.0,
        }
    }
}

/// Composite background. Persisted as one token string: `#rrggbb` for
/// solid colors, `theme:<name>` for app theme fills, `gradient:<name>`
/// for the gradient presets.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Solid(String),
    Theme(String),
    Gradient(String),
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid("#12141c".to_string())
    }
}

impl Background {
    pub fn token(&self) -> String {
        match self {
            Background::Solid(hex) => hex.clone(),
            Background::Theme(name) => format!("theme:{name}"),
            Background::Gradient(name) => format!("gradient:{name}"),
        }
    }

    /// Unknown tokens fall back to the default solid.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if let Some(name) = token.strip_prefix("theme:") {
            return Background::Theme(name.to_string());
        }
        if let Some(name) = token.strip_prefix("gradient:") {
            return Background::Gradient(name.to_string());
        }
        if token.starts_with('#') && matches!(token.len(), 7 | 9) {
            return Background::Solid(token.to_ascii_lowercase());
        }
        Background::default()
    }
}

/// Photo slot styling: shape, border, spacing between slots.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositeStyle {
    #[serde(default)]
    pub shape: PhotoShape,
    /// Corner radius used when `shape` is `Squircle`.
    #[serde(default = "default_squircle_radius")]
    pub squircle_radius: f64,
    #[serde(default)]
    pub border_enabled: bool,
    #[serde(default = "default_border_color")]
    pub border_color: String,
    #[serde(default = "default_border_width")]
    pub border_width: f64,
    /// Gap in pixels between photo slots.
    #[serde(default = "default_photo_spacing")]
    pub spacing: f64,
}

impl Default for CompositeStyle {
    fn default() -> Self {
        Self {
            shape: PhotoShape::default(),
            squircle_radius: default_squircle_radius(),
            border_enabled: false,
            border_color: default_border_color(),
            border_width: default_border_width(),
            spacing: default_photo_spacing(),
        }
    }
}

pub(crate) fn default_squircle_radius() -> f64 {
    24.0
}

pub(crate) fn default_border_color() -> String {
    "#ffffff".to_string()
}

pub(crate) fn default_border_width() -> f64 {
    2.0
}

pub(crate) fn default_photo_spacing() -> f64 {
    4.0
}

/// Everything the customize step persists for one comparison. Created on
/// first customization, mutated by every interaction, reconstructed on
/// re-edit via the settings codec.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonSettings {
    pub layout: ComparisonLayout,
    pub show_logo: bool,
    pub show_dates: bool,
    pub show_stats: bool,
    pub show_photo_weights: bool,
    pub show_ai_summary: bool,
    pub positions: OverlayPositions,
    /// Non-empty subset of the stat categories.
    pub enabled_categories: BTreeSet<StatCategory>,
    pub style: CompositeStyle,
    pub background: Background,
    pub aspect: ExportAspect,
    pub date_alignment: DateAlignment,
    /// Cached AI-generated summary text, kept across edits until
    /// regenerated.
    pub summary_text: Option<String>,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            layout: ComparisonLayout::SideBySide,
            show_logo: true,
            show_dates: true,
            show_stats: true,
            show_photo_weights: false,
            show_ai_summary: false,
            positions: OverlayPositions::new(),
            enabled_categories: default_categories(),
            style: CompositeStyle::default(),
            background: Background::default(),
            aspect: ExportAspect::default(),
            date_alignment: DateAlignment::default(),
            summary_text: None,
        }
    }
}
