//! The editing session: one comparison being customized.
//!
//! The session is an explicit context object — every core operation
//! takes it (or is a method on it) instead of reaching for ambient
//! process state. It owns the selection, the settings, and the overlay
//! placements, and routes every mutation through methods that apply the
//! truncation and invalidation rules. All of it is single-threaded,
//! synchronous state; the only asynchronous boundaries (AI summary,
//! capture/export) are modeled as request gates below.

use crate::catalog::model::ComparisonLayout;
use crate::catalog::resolver::{SlotResolution, resolve_slots};
use crate::foundation::core::{Canvas, Point, abs_day_span};
use crate::foundation::error::ReframeResult;
use crate::overlay::geometry::{CanvasMetrics, default_overlay_origin, overlay_footprint};
use crate::overlay::model::OverlayId;
use crate::progress::model::{ImageRef, MeasurementType, SelectedPhotoSet};
use crate::settings::model::{
    Background, ComparisonSettings, CompositeStyle, DateAlignment, ExportAspect,
};
use crate::stats::engine::{StatCategory, StatDatum, StatsInput, compute_stats};
use crate::stats::matcher::weight_for_photo;

use std::collections::BTreeMap;

/// At-most-one-in-flight gate for an external request. Re-invoking
/// while loading is a no-op, not a queue; cancellation mid-request is
/// not supported.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestGate {
    in_flight: bool,
}

impl RequestGate {
    /// Claims the gate. `false` means a request is already outstanding
    /// and the caller must drop this invocation.
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_loading(self) -> bool {
        self.in_flight
    }
}

/// Inputs handed to the external AI-summary collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRequest {
    pub before_image: ImageRef,
    pub after_image: ImageRef,
    pub days_between: i64,
    pub weight_change_kg: Option<f64>,
}

/// External AI-summary collaborator. Failures are surfaced verbatim to
/// the user; the session never rolls back state on them.
pub trait SummaryProvider {
    fn summarize(&self, request: &SummaryRequest) -> ReframeResult<String>;
}

/// One comparison being edited.
#[derive(Clone, Debug)]
pub struct ComparisonSession {
    canvas: Canvas,
    photos: SelectedPhotoSet,
    settings: ComparisonSettings,
    summary_gate: RequestGate,
    export_gate: RequestGate,
}

impl ComparisonSession {
    pub fn new(canvas: Canvas, photos: SelectedPhotoSet) -> Self {
        Self::restore(canvas, photos, ComparisonSettings::default())
    }

    /// Re-opens a previously persisted comparison.
    pub fn restore(canvas: Canvas, photos: SelectedPhotoSet, settings: ComparisonSettings) -> Self {
        Self {
            canvas,
            photos,
            settings,
            summary_gate: RequestGate::default(),
            export_gate: RequestGate::default(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn photos(&self) -> &SelectedPhotoSet {
        &self.photos
    }

    pub fn settings(&self) -> &ComparisonSettings {
        &self.settings
    }

    /// Current selection resolved against the active layout.
    pub fn resolution(&self) -> SlotResolution {
        resolve_slots(self.settings.layout, &self.photos)
    }

    /// Gate for statistics and export: the selection must satisfy the
    /// active layout's cardinality.
    pub fn can_proceed(&self) -> bool {
        self.resolution().is_valid
    }

    /// Replaces the ordered selection wholesale (photo picker flow).
    /// Selection changes do not disturb overlay placements.
    pub fn select_photos(&mut self, photos: SelectedPhotoSet) -> SlotResolution {
        self.photos = photos;
        self.resolution()
    }

    /// Switches the active layout. If the new layout's maximum is below
    /// the current selection count, the selection is truncated to the
    /// first N in existing order. Any layout change discards every
    /// explicit overlay placement.
    pub fn select_layout(&mut self, layout: ComparisonLayout) -> SlotResolution {
        if layout == self.settings.layout {
            return self.resolution();
        }
        self.settings.layout = layout;
        self.photos
            .truncate_to(layout.cardinality().max_photos());
        self.settings.positions.clear_all();
        self.resolution()
    }

    pub fn set_aspect(&mut self, aspect: ExportAspect) {
        if aspect == self.settings.aspect {
            return;
        }
        self.settings.aspect = aspect;
        self.settings.positions.clear_all();
    }

    pub fn set_date_alignment(&mut self, alignment: DateAlignment) {
        if alignment == self.settings.date_alignment {
            return;
        }
        self.settings.date_alignment = alignment;
        self.settings.positions.clear_date_chips();
    }

    /// Category toggles re-shape the stats bar, so its explicit
    /// placement goes stale; chips and logo keep theirs. The last
    /// enabled category cannot be toggled off.
    pub fn toggle_category(&mut self, category: StatCategory) -> bool {
        if self.settings.enabled_categories.contains(&category) {
            if self.settings.enabled_categories.len() == 1 {
                return false;
            }
            self.settings.enabled_categories.remove(&category);
        } else {
            self.settings.enabled_categories.insert(category);
        }
        self.settings.positions.clear(OverlayId::StatsBar);
        true
    }

    // Visibility and style changes never disturb explicit placements.

    pub fn set_show_logo(&mut self, show: bool) {
        self.settings.show_logo = show;
    }

    pub fn set_show_dates(&mut self, show: bool) {
        self.settings.show_dates = show;
    }

    pub fn set_show_stats(&mut self, show: bool) {
        self.settings.show_stats = show;
    }

    pub fn set_show_photo_weights(&mut self, show: bool) {
        self.settings.show_photo_weights = show;
    }

    pub fn set_show_ai_summary(&mut self, show: bool) {
        self.settings.show_ai_summary = show;
    }

    pub fn set_style(&mut self, style: CompositeStyle) {
        self.settings.style = style;
    }

    pub fn set_background(&mut self, background: Background) {
        self.settings.background = background;
    }

    /// Editing-canvas metrics for the current configuration.
    pub fn metrics(&self) -> CanvasMetrics {
        let metrics = CanvasMetrics::new(self.canvas);
        if self.settings.show_ai_summary && self.settings.summary_text.is_some() {
            metrics.with_summary_strip()
        } else {
            metrics
        }
    }

    /// Records a drag, clamped so the overlay stays on the canvas.
    pub fn drag_overlay(&mut self, id: OverlayId, to: Point, stats_rows: usize) {
        let metrics = self.metrics();
        let footprint = overlay_footprint(&metrics, id, stats_rows);
        self.settings
            .positions
            .place(id, to, self.canvas.bounds(), footprint);
    }

    /// Render position for an overlay: explicit if the user dragged it,
    /// else computed from current geometry.
    pub fn resolve_overlay(&self, id: OverlayId, stats_rows: usize) -> Point {
        let metrics = self.metrics();
        self.settings.positions.resolve(id, || {
            default_overlay_origin(
                &metrics,
                id,
                self.settings.layout,
                self.photos.len(),
                self.settings.date_alignment,
                stats_rows,
            )
        })
    }

    /// Statistics for the current selection and enabled categories.
    pub fn stats(
        &self,
        input: &StatsInput<'_>,
    ) -> Option<BTreeMap<StatCategory, StatDatum>> {
        if !self.can_proceed() {
            return None;
        }
        compute_stats(&self.photos, &self.settings.enabled_categories, input)
    }

    pub fn is_summary_loading(&self) -> bool {
        self.summary_gate.is_loading()
    }

    pub fn is_export_loading(&self) -> bool {
        self.export_gate.is_loading()
    }

    /// Claims the summary gate and builds the collaborator request.
    /// `None` while a request is outstanding or the selection cannot
    /// proceed — re-invocations are dropped, not queued.
    pub fn begin_summary(&mut self, input: &StatsInput<'_>) -> Option<SummaryRequest> {
        if !self.can_proceed() {
            return None;
        }
        let (first, last) = self.photos.endpoints()?;
        if !self.summary_gate.try_begin() {
            return None;
        }

        let weight_series = input
            .measurements
            .get(&MeasurementType::Weight)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let before = weight_for_photo(first, weight_series, input.tolerance_days);
        let after = weight_for_photo(last, weight_series, input.tolerance_days);

        Some(SummaryRequest {
            before_image: first.image.clone(),
            after_image: last.image.clone(),
            days_between: abs_day_span(first.taken_at, last.taken_at),
            weight_change_kg: match (before, after) {
                (Some(b), Some(a)) => Some(a - b),
                _ => None,
            },
        })
    }

    /// Completes the summary request. Success caches the text; failure
    /// propagates the error and leaves any previously cached summary
    /// untouched.
    pub fn finish_summary(&mut self, outcome: ReframeResult<String>) -> ReframeResult<()> {
        self.summary_gate.finish();
        let text = outcome?;
        self.settings.summary_text = Some(text);
        Ok(())
    }

    /// Claims the export gate. `false` while an export is outstanding
    /// or the selection cannot proceed.
    pub fn begin_export(&mut self) -> bool {
        self.can_proceed() && self.export_gate.try_begin()
    }

    /// Completes an export. Failures leave settings and selection
    /// exactly as they were.
    pub fn finish_export(&mut self, outcome: ReframeResult<()>) -> ReframeResult<()> {
        self.export_gate.finish();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::ReframeError;
    use crate::progress::model::{ProgressPhoto, ViewType};
    use chrono::{TimeZone, Utc};

    fn photo(id: &str, day: u32, weight: Option<f64>) -> ProgressPhoto {
        ProgressPhoto {
            id: id.to_string(),
            view: ViewType::Front,
            taken_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
            image: ImageRef::new(format!("images/{id}.jpg")),
            body_weight_kg: weight,
        }
    }

    fn canvas() -> Canvas {
        Canvas {
            width: 1080,
            height: 1350,
        }
    }

    fn session_with(n: usize) -> ComparisonSession {
        let photos = SelectedPhotoSet::new(
            (0..n)
                .map(|i| photo(&format!("p{i}"), 1 + i as u32, None))
                .collect(),
        );
        ComparisonSession::new(canvas(), photos)
    }

    #[test]
    fn layout_switch_resets_dragged_stats_bar() {
        let mut session = session_with(2);
        session.drag_overlay(OverlayId::StatsBar, Point::new(100.0, 200.0), 2);
        assert!(session.settings().positions.is_explicit(OverlayId::StatsBar));

        session.select_layout(ComparisonLayout::VerticalStack);
        assert!(!session.settings().positions.is_explicit(OverlayId::StatsBar));
    }

    #[test]
    fn visibility_toggle_keeps_dragged_position() {
        let mut session = session_with(2);
        session.drag_overlay(OverlayId::StatsBar, Point::new(100.0, 200.0), 2);
        let placed = session.settings().positions.get(OverlayId::StatsBar);

        session.set_show_logo(false);
        session.set_show_dates(false);
        session.set_style(CompositeStyle {
            border_enabled: true,
            ..CompositeStyle::default()
        });
        assert_eq!(session.settings().positions.get(OverlayId::StatsBar), placed);
    }

    #[test]
    fn shrinking_layout_truncates_selection_and_invalidates() {
        let mut session = session_with(4);
        session.select_layout(ComparisonLayout::GridFour);
        session.drag_overlay(OverlayId::DateChip(0), Point::new(50.0, 50.0), 1);
        session.drag_overlay(OverlayId::Logo, Point::new(10.0, 10.0), 1);

        let res = session.select_layout(ComparisonLayout::SideBySide);
        assert!(res.is_valid);
        assert_eq!(session.photos().len(), 2);
        assert_eq!(session.photos().0[0].id, "p0");
        assert_eq!(session.photos().0[1].id, "p1");
        assert!(session.settings().positions.is_empty());
    }

    #[test]
    fn aspect_change_invalidates_but_reselect_does_not() {
        let mut session = session_with(2);
        session.drag_overlay(OverlayId::Logo, Point::new(30.0, 40.0), 1);

        // Setting the same aspect again is not a change.
        session.set_aspect(ExportAspect::Portrait);
        assert!(session.settings().positions.is_explicit(OverlayId::Logo));

        session.set_aspect(ExportAspect::Story);
        assert!(session.settings().positions.is_empty());
    }

    #[test]
    fn date_alignment_change_clears_chips_only() {
        let mut session = session_with(2);
        session.drag_overlay(OverlayId::DateChip(0), Point::new(20.0, 1200.0), 1);
        session.drag_overlay(OverlayId::StatsBar, Point::new(0.0, 800.0), 1);

        session.set_date_alignment(DateAlignment::Right);
        assert!(!session.settings().positions.is_explicit(OverlayId::DateChip(0)));
        assert!(session.settings().positions.is_explicit(OverlayId::StatsBar));
    }

    #[test]
    fn last_category_cannot_be_disabled() {
        let mut session = session_with(2);
        assert!(session.toggle_category(StatCategory::Weight));
        assert!(!session.toggle_category(StatCategory::Duration));
        assert!(
            session
                .settings()
                .enabled_categories
                .contains(&StatCategory::Duration)
        );
    }

    #[test]
    fn summary_gate_drops_reentrant_requests() {
        let mut session = ComparisonSession::new(
            canvas(),
            SelectedPhotoSet::new(vec![photo("a", 1, Some(80.0)), photo("b", 15, Some(78.0))]),
        );
        let measurements = BTreeMap::new();
        let input = StatsInput::new(&measurements);

        let req = session.begin_summary(&input).unwrap();
        assert_eq!(req.days_between, 14);
        assert_eq!(req.weight_change_kg, Some(-2.0));
        assert!(session.is_summary_loading());
        assert!(session.begin_summary(&input).is_none());

        session
            .finish_summary(Ok("Fourteen days of progress.".to_string()))
            .unwrap();
        assert!(!session.is_summary_loading());
        assert!(session.begin_summary(&input).is_some());
    }

    #[test]
    fn failed_summary_keeps_cached_text() {
        let mut session = session_with(2);
        let measurements = BTreeMap::new();
        let input = StatsInput::new(&measurements);

        session.begin_summary(&input).unwrap();
        session
            .finish_summary(Ok("First summary.".to_string()))
            .unwrap();

        session.begin_summary(&input).unwrap();
        let err = session
            .finish_summary(Err(ReframeError::external("summary service unavailable")))
            .unwrap_err();
        assert_eq!(err.to_string(), "summary service unavailable");
        assert_eq!(
            session.settings().summary_text.as_deref(),
            Some("First summary.")
        );
        assert!(!session.is_summary_loading());
    }

    #[test]
    fn export_gate_requires_valid_selection() {
        let mut session = session_with(3);
        assert!(!session.can_proceed());
        assert!(!session.begin_export());

        session.select_layout(ComparisonLayout::Triptych);
        assert!(session.begin_export());
        assert!(!session.begin_export());
        session.finish_export(Ok(())).unwrap();
        assert!(session.begin_export());
    }
}
