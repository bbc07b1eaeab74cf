//! Default placement geometry for overlays and photo slots.
//!
//! Everything here is pure arithmetic over the editing canvas. Explicit
//! user placements (see [`crate::overlay::model`]) take precedence over
//! these defaults at resolve time.

use crate::catalog::model::{ComparisonLayout, Orientation};
use crate::foundation::core::{Canvas, Point, Rect, Size};
use crate::overlay::model::OverlayId;
use crate::settings::model::DateAlignment;

/// Height reserved at the canvas bottom for the footer strip.
pub const FOOTER_HEIGHT: f64 = 56.0;
/// Height of the AI-summary strip when one is shown.
pub const SUMMARY_STRIP_HEIGHT: f64 = 72.0;
/// Margin kept between overlays and canvas/segment edges.
pub const EDGE_MARGIN: f64 = 12.0;
/// Stats bar height per statistic row: two text rows plus padding.
pub const STATS_ROW_HEIGHT: f64 = 44.0;
pub const STATS_BAR_PADDING: f64 = 12.0;
pub const STATS_BAR_MIN_HEIGHT: f64 = 88.0;
pub const DATE_CHIP_SIZE: Size = Size::new(120.0, 28.0);
pub const LOGO_SIZE: Size = Size::new(96.0, 32.0);

/// Canvas bounds plus the fixed strips that overlay defaults anchor to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasMetrics {
    pub canvas: Canvas,
    pub footer_height: f64,
    /// Zero when no AI summary strip is visible.
    pub summary_height: f64,
}

impl CanvasMetrics {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            footer_height: FOOTER_HEIGHT,
            summary_height: 0.0,
        }
    }

    pub fn with_summary_strip(mut self) -> Self {
        self.summary_height = SUMMARY_STRIP_HEIGHT;
        self
    }

    pub fn width(&self) -> f64 {
        f64::from(self.canvas.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.canvas.height)
    }

    /// Bottom edge of the overlay content area, above footer and
    /// summary strip.
    pub fn content_bottom(&self) -> f64 {
        self.height() - self.footer_height - self.summary_height
    }
}

fn align_offset(container: f64, content: f64, align: DateAlignment) -> f64 {
    match align {
        DateAlignment::Left => EDGE_MARGIN,
        DateAlignment::Center => ((container - content) * 0.5).max(0.0),
        DateAlignment::Right => (container - content - EDGE_MARGIN).max(0.0),
    }
}

/// Stats bar default: full width, bottom-anchored above footer and
/// summary strip, height derived from the visible row count.
pub fn stats_bar_frame(metrics: &CanvasMetrics, rows: usize) -> Rect {
    let height =
        ((rows as f64) * STATS_ROW_HEIGHT + 2.0 * STATS_BAR_PADDING).max(STATS_BAR_MIN_HEIGHT);
    let bottom = metrics.content_bottom();
    Rect::new(0.0, bottom - height, metrics.width(), bottom)
}

/// Default date-chip origins, one per photo slot.
///
/// Horizontal layouts place one chip per column segment; vertical
/// layouts stack chips per row segment with the alignment applied across
/// the full width; freeform two-photo layouts use the left and right
/// halves. Freeform layouts with any other count fall back to the
/// horizontal rule.
pub fn date_chip_origins(
    metrics: &CanvasMetrics,
    layout: ComparisonLayout,
    n: usize,
    align: DateAlignment,
) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }

    match layout.orientation() {
        Orientation::Vertical => {
            let seg_h = metrics.height() / (n as f64);
            let x = align_offset(metrics.width(), DATE_CHIP_SIZE.width, align);
            (0..n)
                .map(|i| {
                    let seg_bottom = seg_h * ((i + 1) as f64);
                    let y = (seg_bottom - DATE_CHIP_SIZE.height - EDGE_MARGIN)
                        .min(metrics.content_bottom() - DATE_CHIP_SIZE.height - EDGE_MARGIN);
                    Point::new(x, y)
                })
                .collect()
        }
        Orientation::Horizontal | Orientation::Freeform => {
            let seg_w = metrics.width() / (n as f64);
            let y = metrics.content_bottom() - DATE_CHIP_SIZE.height - EDGE_MARGIN;
            (0..n)
                .map(|i| {
                    let x = seg_w * (i as f64) + align_offset(seg_w, DATE_CHIP_SIZE.width, align);
                    Point::new(x, y)
                })
                .collect()
        }
    }
}

/// Logo default: bottom-trailing corner above the footer.
pub fn logo_origin(metrics: &CanvasMetrics) -> Point {
    Point::new(
        metrics.width() - LOGO_SIZE.width - EDGE_MARGIN,
        metrics.content_bottom() - LOGO_SIZE.height - EDGE_MARGIN,
    )
}

/// Default origin for any overlay identity.
pub fn default_overlay_origin(
    metrics: &CanvasMetrics,
    id: OverlayId,
    layout: ComparisonLayout,
    photo_count: usize,
    align: DateAlignment,
    stats_rows: usize,
) -> Point {
    match id {
        OverlayId::Logo => logo_origin(metrics),
        OverlayId::StatsBar => stats_bar_frame(metrics, stats_rows).origin(),
        OverlayId::DateChip(index) => date_chip_origins(metrics, layout, photo_count, align)
            .get(index)
            .copied()
            .unwrap_or_else(|| {
                Point::new(
                    EDGE_MARGIN,
                    metrics.content_bottom() - DATE_CHIP_SIZE.height - EDGE_MARGIN,
                )
            }),
    }
}

/// Footprint used to clamp drags for an overlay identity.
pub fn overlay_footprint(metrics: &CanvasMetrics, id: OverlayId, stats_rows: usize) -> Size {
    match id {
        OverlayId::Logo => LOGO_SIZE,
        OverlayId::StatsBar => stats_bar_frame(metrics, stats_rows).size(),
        OverlayId::DateChip(_) => DATE_CHIP_SIZE,
    }
}

/// Photo slot frames for a layout and selection size.
///
/// Horizontal layouts split the canvas into columns separated by
/// `spacing`, vertical layouts into rows; the grid uses two columns.
/// Overlapping freeform layouts (slider, diagonal, polaroid) give every
/// slot the full canvas and leave the divider/tilt to the renderer.
pub fn slot_frames(
    canvas: Canvas,
    layout: ComparisonLayout,
    n: usize,
    spacing: f64,
) -> Vec<Rect> {
    if n == 0 {
        return Vec::new();
    }
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);

    match layout.orientation() {
        Orientation::Horizontal => {
            let slot_w = (w - spacing * ((n - 1) as f64)) / (n as f64);
            (0..n)
                .map(|i| {
                    let x = (slot_w + spacing) * (i as f64);
                    Rect::new(x, 0.0, x + slot_w, h)
                })
                .collect()
        }
        Orientation::Vertical => {
            let slot_h = (h - spacing * ((n - 1) as f64)) / (n as f64);
            (0..n)
                .map(|i| {
                    let y = (slot_h + spacing) * (i as f64);
                    Rect::new(0.0, y, w, y + slot_h)
                })
                .collect()
        }
        Orientation::Freeform => match layout {
            ComparisonLayout::GridFour => {
                let cols = 2usize;
                let rows = n.div_ceil(cols);
                let cell_w = (w - spacing * ((cols - 1) as f64)) / (cols as f64);
                let cell_h = (h - spacing * ((rows - 1) as f64)) / (rows as f64);
                (0..n)
                    .map(|i| {
                        let col = i % cols;
                        let row = i / cols;
                        let x = (cell_w + spacing) * (col as f64);
                        let y = (cell_h + spacing) * (row as f64);
                        Rect::new(x, y, x + cell_w, y + cell_h)
                    })
                    .collect()
            }
            _ => (0..n).map(|_| Rect::new(0.0, 0.0, w, h)).collect(),
        },
    }
}
