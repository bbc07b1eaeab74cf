//! Resolves a session into the layer stack the external capture
//! collaborator rasterizes: photo slots with frames and labels, plus
//! every visible overlay at its resolved position. Pixel painting is
//! the collaborator's business; this module only decides what each
//! layer should be.

use std::collections::BTreeMap;

use crate::catalog::model::ComparisonLayout;
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{ReframeError, ReframeResult};
use crate::overlay::geometry::{CanvasMetrics, overlay_footprint, slot_frames};
use crate::overlay::model::OverlayId;
use crate::progress::model::ImageRef;
use crate::session::editor::ComparisonSession;
use crate::settings::model::{Background, ExportAspect};
use crate::stats::engine::{StatCategory, StatDatum};

/// One photo slot, placed and labeled.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ResolvedSlot {
    pub index: usize,
    pub label: String,
    pub photo_id: String,
    pub image: ImageRef,
    pub frame: Rect,
    /// Date chip text for this slot, e.g. "12 Mar 2024".
    pub date_text: String,
    /// Shoot-time weight, only when the user shows per-photo weights.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_text: Option<String>,
}

/// One visible overlay with its resolved frame.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ResolvedOverlay {
    pub id: OverlayId,
    pub frame: Rect,
    /// Whether the position came from a user drag rather than the
    /// computed default.
    pub explicit: bool,
}

/// The full layer stack for capture, bottom to top.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ResolvedComposite {
    pub layout: ComparisonLayout,
    pub aspect: ExportAspect,
    pub background: Background,
    pub slots: Vec<ResolvedSlot>,
    pub overlays: Vec<ResolvedOverlay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<StatCategory, StatDatum>>,
}

/// External capture collaborator: turns a resolved layer stack into a
/// shareable image artifact at the composite's aspect ratio. Failures
/// are surfaced to the user and never corrupt session state.
pub trait CaptureSink {
    type Artifact;

    fn capture(&mut self, composite: &ResolvedComposite) -> ReframeResult<Self::Artifact>;
}

/// Stats bar rows: one per category present in the computed result.
pub fn stats_row_count(stats: Option<&BTreeMap<StatCategory, StatDatum>>) -> usize {
    stats.map(BTreeMap::len).unwrap_or(0)
}

/// Builds the layer stack for the current session state.
///
/// The selection must satisfy the active layout (callers gate on
/// [`ComparisonSession::can_proceed`] first).
#[tracing::instrument(skip_all, fields(layout = session.settings().layout.id()))]
pub fn resolve_composite(
    session: &ComparisonSession,
    stats: Option<BTreeMap<StatCategory, StatDatum>>,
) -> ReframeResult<ResolvedComposite> {
    let resolution = session.resolution();
    if !resolution.is_valid {
        return Err(ReframeError::validation(
            "selection does not satisfy the active layout",
        ));
    }

    let settings = session.settings();
    let metrics = session.metrics();
    let rows = stats_row_count(stats.as_ref());

    let frames = slot_frames(
        session.canvas(),
        settings.layout,
        session.photos().len(),
        settings.style.spacing,
    );
    let slots = session
        .photos()
        .iter()
        .zip(frames)
        .enumerate()
        .map(|(index, (photo, frame))| ResolvedSlot {
            index,
            label: resolution.labels[index].clone(),
            photo_id: photo.id.clone(),
            image: photo.image.clone(),
            frame,
            date_text: photo.taken_at.format("%-d %b %Y").to_string(),
            weight_text: settings
                .show_photo_weights
                .then(|| photo.body_weight_kg.map(|w| format!("{w:.1} kg")))
                .flatten(),
        })
        .collect();

    let mut overlays = Vec::new();
    if settings.show_dates {
        for index in 0..session.photos().len() {
            let id = OverlayId::DateChip(index);
            overlays.push(resolved_overlay(session, id, rows, &metrics));
        }
    }
    if settings.show_stats && rows > 0 {
        overlays.push(resolved_overlay(session, OverlayId::StatsBar, rows, &metrics));
    }
    if settings.show_logo {
        overlays.push(resolved_overlay(session, OverlayId::Logo, rows, &metrics));
    }

    Ok(ResolvedComposite {
        layout: settings.layout,
        aspect: settings.aspect,
        background: settings.background.clone(),
        slots,
        overlays,
        summary_text: if settings.show_ai_summary {
            settings.summary_text.clone()
        } else {
            None
        },
        stats,
    })
}

fn resolved_overlay(
    session: &ComparisonSession,
    id: OverlayId,
    rows: usize,
    metrics: &CanvasMetrics,
) -> ResolvedOverlay {
    let origin = session.resolve_overlay(id, rows);
    let footprint: Size = overlay_footprint(metrics, id, rows);
    ResolvedOverlay {
        id,
        frame: Rect::from_origin_size(origin, footprint),
        explicit: session.settings().positions.is_explicit(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::{Canvas, Point};
    use crate::progress::model::{ProgressPhoto, SelectedPhotoSet, ViewType};
    use crate::stats::engine::StatsInput;
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

    fn session() -> ComparisonSession {
        ComparisonSession::new(
            Canvas {
                width: 1080,
                height: 1350,
            },
            SelectedPhotoSet::new(vec![photo("a", 2, Some(80.0)), photo("b", 30, Some(78.2))]),
        )
    }

    #[test]
    fn layer_stack_contains_slots_and_visible_overlays() {
        let session = session();
        let measurements = BTreeMap::new();
        let stats = session.stats(&StatsInput::new(&measurements));
        let composite = resolve_composite(&session, stats).unwrap();

        assert_eq!(composite.slots.len(), 2);
        assert_eq!(composite.slots[0].label, "Before");
        assert_eq!(composite.slots[0].date_text, "2 Mar 2024");
        // Two chips, the stats bar, and the logo.
        assert_eq!(composite.overlays.len(), 4);
        assert!(composite.overlays.iter().all(|o| !o.explicit));
    }

    #[test]
    fn hidden_overlays_are_left_out() {
        let mut session = session();
        session.set_show_dates(false);
        session.set_show_logo(false);
        session.set_show_stats(false);

        let composite = resolve_composite(&session, None).unwrap();
        assert!(composite.overlays.is_empty());
        assert!(composite.stats.is_none());
    }

    #[test]
    fn dragged_overlay_resolves_explicit() {
        let mut session = session();
        session.drag_overlay(OverlayId::Logo, Point::new(16.0, 16.0), 0);
        let composite = resolve_composite(&session, None).unwrap();

        let logo = composite
            .overlays
            .iter()
            .find(|o| o.id == OverlayId::Logo)
            .unwrap();
        assert!(logo.explicit);
        assert_eq!(logo.frame.origin(), Point::new(16.0, 16.0));
    }

    #[test]
    fn weight_text_follows_toggle() {
        let mut session = session();
        let composite = resolve_composite(&session, None).unwrap();
        assert!(composite.slots[0].weight_text.is_none());

        session.set_show_photo_weights(true);
        let composite = resolve_composite(&session, None).unwrap();
        assert_eq!(composite.slots[0].weight_text.as_deref(), Some("80.0 kg"));
    }

    #[test]
    fn invalid_selection_is_rejected() {
        let session = ComparisonSession::new(
            Canvas {
                width: 1080,
                height: 1350,
            },
            SelectedPhotoSet::new(vec![photo("a", 2, None)]),
        );
        assert!(resolve_composite(&session, None).is_err());
    }

    #[test]
    fn capture_failure_leaves_session_untouched() {
        struct FailingSink;
        impl CaptureSink for FailingSink {
            type Artifact = Vec<u8>;

            fn capture(&mut self, _: &ResolvedComposite) -> ReframeResult<Vec<u8>> {
                Err(ReframeError::external("render service unavailable"))
            }
        }

        let mut session = session();
        let before = session.settings().clone();
        assert!(session.begin_export());

        let composite = resolve_composite(&session, None).unwrap();
        let err = FailingSink.capture(&composite).unwrap_err();
        let err = session.finish_export(Err(err)).unwrap_err();
        assert_eq!(err.to_string(), "render service unavailable");
        assert_eq!(*session.settings(), before);
        assert!(session.begin_export());
    }

    #[test]
    fn timeline_slots_follow_selection_order() {
        let mut session = ComparisonSession::new(
            Canvas {
                width: 1200,
                height: 800,
            },
            SelectedPhotoSet::new(vec![
                photo("a", 1, None),
                photo("b", 10, None),
                photo("c", 20, None),
            ]),
        );
        session.select_layout(ComparisonLayout::Timeline);
        let composite = resolve_composite(&session, None).unwrap();
        assert_eq!(composite.slots.len(), 3);
        assert_eq!(composite.slots[0].label, "Start");
        assert_eq!(composite.slots[2].label, "Latest");
        assert!(composite.slots[0].frame.x1 <= composite.slots[1].frame.x0 + 0.001);
    }
}
