//! Explicit-vs-sentinel positions for draggable overlays.
//!
//! Each overlay identity maps to either an explicit offset (the user
//! dragged it) or nothing — the sentinel, meaning "compute the default
//! from current geometry". Invalidation is an explicit reset of the
//! map, never implicit recomputation scattered through UI callbacks.

use std::collections::BTreeMap;

use crate::foundation::core::{Point, Rect, Size};

/// Identity of one draggable decoration on the composite.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OverlayId {
    Logo,
    StatsBar,
    /// One chip per photo slot, keyed by slot index.
    DateChip(usize),
}

/// Position store for all overlays of one comparison.
///
/// Absence of a key is the sentinel. Once a user drags an overlay its
/// position becomes explicit and is never silently overwritten — only
/// the reset operations below discard it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayPositions {
    explicit: BTreeMap<OverlayId, Point>,
}

impl OverlayPositions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: OverlayId) -> Option<Point> {
        self.explicit.get(&id).copied()
    }

    pub fn is_explicit(&self, id: OverlayId) -> bool {
        self.explicit.contains_key(&id)
    }

    /// Explicit position if set, else the computed default.
    pub fn resolve(&self, id: OverlayId, default: impl FnOnce() -> Point) -> Point {
        self.get(id).unwrap_or_else(default)
    }

    /// Records a drag. The position is clamped so the overlay's
    /// footprint stays inside `bounds`.
    pub fn place(&mut self, id: OverlayId, to: Point, bounds: Rect, footprint: Size) {
        self.explicit.insert(id, clamp_to(to, bounds, footprint));
    }

    /// Restores a persisted explicit position verbatim (already clamped
    /// when it was recorded).
    pub fn restore(&mut self, id: OverlayId, at: Point) {
        self.explicit.insert(id, at);
    }

    /// Layout or aspect-ratio change: every placement is stale.
    pub fn clear_all(&mut self) {
        self.explicit.clear();
    }

    /// Drops a single placement back to the sentinel.
    pub fn clear(&mut self, id: OverlayId) {
        self.explicit.remove(&id);
    }

    /// Date-alignment change: only chip placements are stale.
    pub fn clear_date_chips(&mut self) {
        self.explicit
            .retain(|id, _| !matches!(id, OverlayId::DateChip(_)));
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverlayId, Point)> + '_ {
        self.explicit.iter().map(|(&id, &p)| (id, p))
    }

    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty()
    }
}

/// Clamps `to` so a `footprint`-sized overlay stays inside `bounds`.
/// Oversized footprints pin to the top-left edge rather than panic.
fn clamp_to(to: Point, bounds: Rect, footprint: Size) -> Point {
    let max_x = (bounds.x1 - footprint.width).max(bounds.x0);
    let max_y = (bounds.y1 - footprint.height).max(bounds.y0);
    Point::new(
        to.x.min(max_x).max(bounds.x0),
        to.y.min(max_y).max(bounds.y0),
    )
}
