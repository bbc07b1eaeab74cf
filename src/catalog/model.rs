//! The layout catalog: the fixed set of comparison layout variants a
//! user can pick from. Each variant exposes its slot cardinality, label
//! generation, and orientation as pure functions; geometry lives in
//! [`crate::overlay::geometry`].

/// How a layout arranges its photo slots on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Slots split the canvas into side-by-side columns.
    Horizontal,
    /// Slots split the canvas into stacked rows.
    Vertical,
    /// Slots overlap or carry layout-specific placement (slider,
    /// diagonal split, polaroid, grid).
    Freeform,
}

/// Slot count a layout accepts: exactly one count, or a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SlotCardinality {
    Fixed(usize),
    Range { min: usize, max: usize },
}

impl SlotCardinality {
    pub fn contains(self, n: usize) -> bool {
        match self {
            SlotCardinality::Fixed(count) => n == count,
            SlotCardinality::Range { min, max } => min <= n && n <= max,
        }
    }

    pub fn max_photos(self) -> usize {
        match self {
            SlotCardinality::Fixed(count) => count,
            SlotCardinality::Range { max, .. } => max,
        }
    }

    pub fn min_photos(self) -> usize {
        match self {
            SlotCardinality::Fixed(count) => count,
            SlotCardinality::Range { min, .. } => min,
        }
    }
}

/// Catalog of comparison layouts.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonLayout {
    /// Two columns, before on the left.
    SideBySide,
    /// Two rows, before on top.
    VerticalStack,
    /// Three columns: start, midway, current.
    Triptych,
    /// 2x2 grid of four photos.
    GridFour,
    /// Horizontal strip of 2..=6 photos in chronological slot order.
    Timeline,
    /// Both photos full-bleed behind a draggable reveal divider.
    Slider,
    /// Both photos full-bleed, split along the diagonal.
    DiagonalSplit,
    /// Two tilted polaroid-style cards.
    Polaroid,
}

impl ComparisonLayout {
    pub const ALL: [ComparisonLayout; 8] = [
        ComparisonLayout::SideBySide,
        ComparisonLayout::VerticalStack,
        ComparisonLayout::Triptych,
        ComparisonLayout::GridFour,
        ComparisonLayout::Timeline,
        ComparisonLayout::Slider,
        ComparisonLayout::DiagonalSplit,
        ComparisonLayout::Polaroid,
    ];

    /// Stable string key used in persisted settings documents. Catalog
    /// reordering must never change these.
    pub fn id(self) -> &'static str {
        match self {
            ComparisonLayout::SideBySide => "side_by_side",
            ComparisonLayout::VerticalStack => "vertical_stack",
            ComparisonLayout::Triptych => "triptych",
            ComparisonLayout::GridFour => "grid_four",
            ComparisonLayout::Timeline => "timeline",
            ComparisonLayout::Slider => "slider",
            ComparisonLayout::DiagonalSplit => "diagonal_split",
            ComparisonLayout::Polaroid => "polaroid",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        ComparisonLayout::ALL.into_iter().find(|l| l.id() == id)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ComparisonLayout::SideBySide => "Side by side",
            ComparisonLayout::VerticalStack => "Stacked",
            ComparisonLayout::Triptych => "Triptych",
            ComparisonLayout::GridFour => "Four grid",
            ComparisonLayout::Timeline => "Timeline",
            ComparisonLayout::Slider => "Slider",
            ComparisonLayout::DiagonalSplit => "Diagonal",
            ComparisonLayout::Polaroid => "Polaroid",
        }
    }

    pub fn cardinality(self) -> SlotCardinality {
        match self {
            ComparisonLayout::SideBySide
            | ComparisonLayout::VerticalStack
            | ComparisonLayout::Slider
            | ComparisonLayout::DiagonalSplit
            | ComparisonLayout::Polaroid => SlotCardinality::Fixed(2),
            ComparisonLayout::Triptych => SlotCardinality::Fixed(3),
            ComparisonLayout::GridFour => SlotCardinality::Fixed(4),
            ComparisonLayout::Timeline => SlotCardinality::Range { min: 2, max: 6 },
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            ComparisonLayout::SideBySide
            | ComparisonLayout::Triptych
            | ComparisonLayout::Timeline => Orientation::Horizontal,
            ComparisonLayout::VerticalStack => Orientation::Vertical,
            ComparisonLayout::GridFour
            | ComparisonLayout::Slider
            | ComparisonLayout::DiagonalSplit
            | ComparisonLayout::Polaroid => Orientation::Freeform,
        }
    }

    /// Ordered slot labels for an `n`-photo selection. Callers fall back
    /// to "Photo {i+1}" past the end of this list.
    pub fn labels(self, n: usize) -> Vec<String> {
        match self {
            ComparisonLayout::Triptych => {
                vec![
                    "Start".to_string(),
                    "Midway".to_string(),
                    "Current".to_string(),
                ]
            }
            ComparisonLayout::GridFour => (1..=4).map(|i| format!("Photo {i}")).collect(),
            ComparisonLayout::Timeline => (0..n)
                .map(|i| {
                    if i == 0 {
                        "Start".to_string()
                    } else if i + 1 == n {
                        "Latest".to_string()
                    } else {
                        format!("Step {}", i + 1)
                    }
                })
                .collect(),
            _ => vec!["Before".to_string(), "After".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip_for_every_variant() {
        for layout in ComparisonLayout::ALL {
            assert_eq!(ComparisonLayout::from_id(layout.id()), Some(layout));
        }
        assert_eq!(ComparisonLayout::from_id("mystery_layout"), None);
        assert_eq!(
            ComparisonLayout::from_id("  Side_By_Side "),
            Some(ComparisonLayout::SideBySide)
        );
    }

    #[test]
    fn cardinality_invariants_hold() {
        for layout in ComparisonLayout::ALL {
            match layout.cardinality() {
                SlotCardinality::Fixed(n) => assert!(n >= 2),
                SlotCardinality::Range { min, max } => {
                    assert!(min >= 2);
                    assert!(max >= min);
                }
            }
        }
    }

    #[test]
    fn timeline_labels_mark_endpoints() {
        let labels = ComparisonLayout::Timeline.labels(4);
        assert_eq!(labels, vec!["Start", "Step 2", "Step 3", "Latest"]);
        assert_eq!(ComparisonLayout::Timeline.labels(2), vec!["Start", "Latest"]);
    }

    #[test]
    fn two_photo_layouts_use_before_after() {
        assert_eq!(
            ComparisonLayout::Slider.labels(2),
            vec!["Before", "After"]
        );
    }
}
