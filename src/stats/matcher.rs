//! Nearest-date lookup over a measurement time series.

use chrono::{DateTime, Utc};

use crate::foundation::core::abs_day_span;
use crate::progress::model::{MeasurementEntry, ProgressPhoto};

/// Default matching window. A difference of exactly this many days is
/// out of tolerance (the boundary is exclusive).
pub const DEFAULT_TOLERANCE_DAYS: i64 = 7;

/// Finds the series value nearest `target`, or `None` when nothing lies
/// strictly inside the tolerance window.
///
/// Ties on day distance keep the first entry encountered in series
/// iteration order, not the most recent. That mirrors the established
/// behavior callers depend on; prefer-most-recent was considered and
/// rejected for compatibility.
pub fn find_closest(
    series: &[MeasurementEntry],
    target: DateTime<Utc>,
    tolerance_days: i64,
) -> Option<f64> {
    let mut best: Option<(i64, f64)> = None;
    for entry in series {
        let diff = abs_day_span(entry.recorded_at, target);
        match best {
            Some((best_diff, _)) if diff >= best_diff => {}
            _ => best = Some((diff, entry.value)),
        }
    }

    match best {
        Some((diff, value)) if diff < tolerance_days => Some(value),
        _ => None,
    }
}

/// Weight for a photo: the embedded shoot-time weight always wins; the
/// series lookup is a fallback only.
pub fn weight_for_photo(
    photo: &ProgressPhoto,
    weight_series: &[MeasurementEntry],
    tolerance_days: i64,
) -> Option<f64> {
    photo
        .body_weight_kg
        .or_else(|| find_closest(weight_series, photo.taken_at, tolerance_days))
}
