//! Per-category progress statistics over an ordered photo selection.
//!
//! The comparison endpoints are the first and last photos of the
//! selection — the user's chosen slot order, not necessarily the
//! earliest/latest timestamps. Categories that cannot derive data are
//! omitted from the result rather than shown as zero.

use std::collections::{BTreeMap, BTreeSet};

use crate::progress::model::{
    MeasurementEntry, MeasurementType, ProgressPhoto, SelectedPhotoSet, StrengthSummary, ViewType,
};
use crate::foundation::core::abs_day_span;
use crate::stats::matcher::{DEFAULT_TOLERANCE_DAYS, find_closest, weight_for_photo};

/// Statistic categories a user can toggle on the composite.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    Duration,
    Weight,
    Body,
    Strength,
}

impl StatCategory {
    pub const ALL: [StatCategory; 4] = [
        StatCategory::Duration,
        StatCategory::Weight,
        StatCategory::Body,
        StatCategory::Strength,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StatCategory::Duration => "duration",
            StatCategory::Weight => "weight",
            StatCategory::Body => "body",
            StatCategory::Strength => "strength",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        StatCategory::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Enabled set applied when nothing is persisted (and when a persisted
/// list decodes to empty).
pub fn default_categories() -> BTreeSet<StatCategory> {
    BTreeSet::from([StatCategory::Duration, StatCategory::Weight])
}

/// Ordered short display strings for one category.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatDatum {
    pub lines: Vec<String>,
}

/// Read-only inputs the engine draws from besides the selection itself.
#[derive(Clone, Debug)]
pub struct StatsInput<'a> {
    /// Measurement series per type, in store order.
    pub measurements: &'a BTreeMap<MeasurementType, Vec<MeasurementEntry>>,
    /// Strength signals from the workout tracker, when available.
    pub strength: Option<StrengthSummary>,
    /// View-type filter active on the photo picker, echoed into the
    /// duration line.
    pub view_filter: Option<ViewType>,
    pub tolerance_days: i64,
}

impl<'a> StatsInput<'a> {
    pub fn new(measurements: &'a BTreeMap<MeasurementType, Vec<MeasurementEntry>>) -> Self {
        Self {
            measurements,
            strength: None,
            view_filter: None,
            tolerance_days: DEFAULT_TOLERANCE_DAYS,
        }
    }
}

/// Body measurement types considered for the body category, in emission
/// order. Right-side limb series are folded into the left-labeled slots
/// by the picker upstream, so only one side is listed here.
const BODY_TYPES: [MeasurementType; 7] = [
    MeasurementType::Chest,
    MeasurementType::Waist,
    MeasurementType::Hips,
    MeasurementType::BicepsLeft,
    MeasurementType::ThighLeft,
    MeasurementType::Neck,
    MeasurementType::Shoulders,
];

/// Deltas smaller than this are measurement noise and suppressed.
const BODY_DEAD_ZONE: f64 = 0.1;

/// At most this many body lines fit the stats bar.
const MAX_BODY_LINES: usize = 4;

/// Computes display data for every enabled category that has derivable
/// data. `None` when fewer than two photos are selected, the enabled set
/// is empty, or no enabled category produced anything.
#[tracing::instrument(skip(photos, enabled, input), fields(photos = photos.len()))]
pub fn compute_stats(
    photos: &SelectedPhotoSet,
    enabled: &BTreeSet<StatCategory>,
    input: &StatsInput<'_>,
) -> Option<BTreeMap<StatCategory, StatDatum>> {
    let (first, last) = photos.endpoints()?;
    if enabled.is_empty() {
        return None;
    }

    let mut out = BTreeMap::new();
    for &category in enabled {
        let datum = match category {
            StatCategory::Duration => Some(duration_datum(photos, first, last, input)),
            StatCategory::Weight => weight_datum(first, last, input),
            StatCategory::Body => body_datum(first, last, input),
            StatCategory::Strength => strength_datum(input.strength),
        };
        if let Some(datum) = datum {
            out.insert(category, datum);
        }
    }

    if out.is_empty() { None } else { Some(out) }
}

fn duration_datum(
    photos: &SelectedPhotoSet,
    first: &ProgressPhoto,
    last: &ProgressPhoto,
    input: &StatsInput<'_>,
) -> StatDatum {
    let days = abs_day_span(first.taken_at, last.taken_at);

    let mut lines = vec![format_day_span(days)];
    if photos.len() > 2 {
        lines.push(format!("{} photos", photos.len()));
    }
    if let Some(view) = input.view_filter {
        lines.push(view.display_name().to_string());
    }
    StatDatum { lines }
}

/// "Same day" / day count / nearest-month count / "{y}y {m}m".
pub fn format_day_span(days: i64) -> String {
    if days == 0 {
        return "Same day".to_string();
    }
    if days < 30 {
        return if days == 1 {
            "1 day".to_string()
        } else {
            format!("{days} days")
        };
    }
    if days < 365 {
        let months = ((days as f64) / 30.0).round().max(1.0) as i64;
        return if months == 1 {
            "1 month".to_string()
        } else {
            format!("{months} months")
        };
    }

    let mut years = days / 365;
    let mut months = (((days % 365) as f64) / 30.0).round() as i64;
    if months == 12 {
        years += 1;
        months = 0;
    }
    format!("{years}y {months}m")
}

fn weight_datum(
    first: &ProgressPhoto,
    last: &ProgressPhoto,
    input: &StatsInput<'_>,
) -> Option<StatDatum> {
    let series = input
        .measurements
        .get(&MeasurementType::Weight)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let before = weight_for_photo(first, series, input.tolerance_days);
    let after = weight_for_photo(last, series, input.tolerance_days);

    let line = match (before, after) {
        (Some(b), Some(a)) => format!("{b:.1} → {a:.1} kg ({:+.1} kg)", a - b),
        (Some(only), None) | (None, Some(only)) => format!("{only:.1} kg"),
        (None, None) => return None,
    };
    Some(StatDatum { lines: vec![line] })
}

fn body_datum(
    first: &ProgressPhoto,
    last: &ProgressPhoto,
    input: &StatsInput<'_>,
) -> Option<StatDatum> {
    let mut lines = Vec::new();
    for kind in BODY_TYPES {
        if lines.len() == MAX_BODY_LINES {
            break;
        }
        let Some(series) = input.measurements.get(&kind) else {
            continue;
        };
        let Some(before) = find_closest(series, first.taken_at, input.tolerance_days) else {
            continue;
        };
        let Some(after) = find_closest(series, last.taken_at, input.tolerance_days) else {
            continue;
        };
        let delta = after - before;
        if delta.abs() < BODY_DEAD_ZONE {
            continue;
        }
        lines.push(format!("{} {delta:+.1} cm", kind.short_label()));
    }

    if lines.is_empty() {
        None
    } else {
        Some(StatDatum { lines })
    }
}

fn strength_datum(strength: Option<StrengthSummary>) -> Option<StatDatum> {
    let s = strength?;
    let mut lines = Vec::new();
    if s.score > 0.0 {
        lines.push(format!("Strength score {:.0}", s.score));
    }
    if s.total_prs > 0 {
        lines.push(format!("{} PRs", s.total_prs));
        if s.recent_prs > 0 {
            lines.push(format!("{} recent PRs", s.recent_prs));
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(StatDatum { lines })
    }
}
