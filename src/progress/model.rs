use chrono::{DateTime, Utc};

/// Opaque reference into the external image storage backend. This core
/// never loads pixels; it only threads references through to the capture
/// collaborator.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(r: impl Into<String>) -> Self {
        Self(r.into())
    }
}

/// Camera angle a progress photo was shot from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    Front,
    SideLeft,
    SideRight,
    Back,
}

impl ViewType {
    pub fn id(self) -> &'static str {
        match self {
            ViewType::Front => "front",
            ViewType::SideLeft => "side_left",
            ViewType::SideRight => "side_right",
            ViewType::Back => "back",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "front" => Some(ViewType::Front),
            "side_left" | "side-left" => Some(ViewType::SideLeft),
            "side_right" | "side-right" => Some(ViewType::SideRight),
            "back" => Some(ViewType::Back),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ViewType::Front => "Front view",
            ViewType::SideLeft => "Left side view",
            ViewType::SideRight => "Right side view",
            ViewType::Back => "Back view",
        }
    }
}

/// A timestamped body photo. Immutable once stored; created by the
/// external capture flow and consumed read-only here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressPhoto {
    pub id: String,
    pub view: ViewType,
    pub taken_at: DateTime<Utc>,
    pub image: ImageRef,
    /// Body weight captured at shoot time, when the user logged one.
    /// Takes precedence over any measurement-series lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_weight_kg: Option<f64>,
}

/// One point in a per-type measurement time series.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeasurementEntry {
    pub recorded_at: DateTime<Utc>,
    pub value: f64,
}

/// Body measurement categories tracked by the app, one series per type.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    Weight,
    Chest,
    Waist,
    Hips,
    BicepsLeft,
    BicepsRight,
    ThighLeft,
    ThighRight,
    Neck,
    Shoulders,
}

impl MeasurementType {
    pub fn id(self) -> &'static str {
        match self {
            MeasurementType::Weight => "weight",
            MeasurementType::Chest => "chest",
            MeasurementType::Waist => "waist",
            MeasurementType::Hips => "hips",
            MeasurementType::BicepsLeft => "biceps_left",
            MeasurementType::BicepsRight => "biceps_right",
            MeasurementType::ThighLeft => "thigh_left",
            MeasurementType::ThighRight => "thigh_right",
            MeasurementType::Neck => "neck",
            MeasurementType::Shoulders => "shoulders",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MeasurementType::Weight => "Weight",
            MeasurementType::Chest => "Chest",
            MeasurementType::Waist => "Waist",
            MeasurementType::Hips => "Hips",
            MeasurementType::BicepsLeft => "Left biceps",
            MeasurementType::BicepsRight => "Right biceps",
            MeasurementType::ThighLeft => "Left thigh",
            MeasurementType::ThighRight => "Right thigh",
            MeasurementType::Neck => "Neck",
            MeasurementType::Shoulders => "Shoulders",
        }
    }

    /// Shortened label used inside the stats overlay, where horizontal
    /// space is tight.
    pub fn short_label(self) -> &'static str {
        match self {
            MeasurementType::Weight => "Weight",
            MeasurementType::Chest => "Chest",
            MeasurementType::Waist => "Waist",
            MeasurementType::Hips => "Hips",
            MeasurementType::BicepsLeft => "Biceps L",
            MeasurementType::BicepsRight => "Biceps R",
            MeasurementType::ThighLeft => "Thigh L",
            MeasurementType::ThighRight => "Thigh R",
            MeasurementType::Neck => "Neck",
            MeasurementType::Shoulders => "Shoulders",
        }
    }
}

/// Strength signals supplied by the external workout tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrengthSummary {
    /// Overall strength score; zero means "no score yet".
    #[serde(default)]
    pub score: f64,
    /// Lifetime personal-record count.
    #[serde(default)]
    pub total_prs: u32,
    /// Personal records within the recent period (e.g. last 30 days).
    #[serde(default)]
    pub recent_prs: u32,
}

impl StrengthSummary {
    pub fn has_signal(&self) -> bool {
        self.score > 0.0 || self.total_prs > 0
    }
}

/// Ordered photo selection. Order encodes slot assignment: the first
/// photo is the "before" endpoint and the last the "after" endpoint,
/// regardless of timestamps.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SelectedPhotoSet(pub Vec<ProgressPhoto>);

impl SelectedPhotoSet {
    pub fn new(photos: Vec<ProgressPhoto>) -> Self {
        Self(photos)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&ProgressPhoto> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&ProgressPhoto> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProgressPhoto> {
        self.0.iter()
    }

    /// Comparison endpoints: first and last of the ordered selection.
    /// `None` until at least two photos are selected.
    pub fn endpoints(&self) -> Option<(&ProgressPhoto, &ProgressPhoto)> {
        if self.0.len() < 2 {
            return None;
        }
        Some((&self.0[0], &self.0[self.0.len() - 1]))
    }

    /// Keeps the first `max` photos in existing order. Returns how many
    /// were dropped.
    pub fn truncate_to(&mut self, max: usize) -> usize {
        let dropped = self.0.len().saturating_sub(max);
        self.0.truncate(max);
        dropped
    }
}
