//! Maps an ordered photo selection onto a layout's slots.
//!
//! The resolver is a pure decision: it never mutates the selection or
//! the photo store. Truncation on layout switches is applied by the
//! session, which owns the selection.

use crate::catalog::model::{ComparisonLayout, SlotCardinality};
use crate::progress::model::{ProgressPhoto, SelectedPhotoSet};

/// Outcome of resolving a selection against a layout.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotResolution {
    /// Whether statistics and export may proceed with this selection.
    pub is_valid: bool,
    /// One label per selected photo, in slot order.
    pub labels: Vec<String>,
    /// Present when the selection exceeds the layout's maximum: the
    /// first `max` photos in existing order. The session applies this
    /// trim and invalidates overlay positions.
    pub trimmed: Option<Vec<ProgressPhoto>>,
}

pub fn resolve_slots(layout: ComparisonLayout, photos: &SelectedPhotoSet) -> SlotResolution {
    let n = photos.len();
    let cardinality = layout.cardinality();
    let is_valid = cardinality.contains(n);

    let named = layout.labels(n);
    let labels = (0..n)
        .map(|i| {
            named
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Photo {}", i + 1))
        })
        .collect();

    let trimmed = match cardinality {
        _ if n <= cardinality.max_photos() => None,
        SlotCardinality::Fixed(max) | SlotCardinality::Range { max, .. } => {
            Some(photos.iter().take(max).cloned().collect())
        }
    };

    SlotResolution {
        is_valid,
        labels,
        trimmed,
    }
}
