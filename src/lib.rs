//! Reframe is a before/after progress-photo composition engine.
//!
//! It turns a timestamped photo selection plus a layout choice into
//! everything a shareable composite needs: resolved photo slots,
//! computed progress statistics, overlay placements, and a persisted
//! settings document — without painting a single pixel itself.
//!
//! # Pipeline overview
//!
//! 1. **Resolve slots**: `ComparisonLayout + SelectedPhotoSet -> SlotResolution`
//!    (is the selection valid, and what does each slot say)
//! 2. **Compute stats**: `SelectedPhotoSet + measurement series -> StatDatum per category`
//! 3. **Place overlays**: explicit drag positions, else defaults computed
//!    from current geometry
//! 4. **Persist**: `ComparisonSettings <-> SettingsDoc`, forward-compatible
//!    both ways
//! 5. **Hand off**: `resolve_composite` produces the layer stack an
//!    external capture collaborator rasterizes
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure core**: slot resolution, matching, statistics, and geometry
//!   are deterministic functions over in-memory state.
//! - **No IO**: photos, measurements, AI summaries, and rasterization
//!   live behind collaborator traits at the crate edge.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod compose;
pub mod foundation;
pub mod overlay;
pub mod progress;
pub mod session;
pub mod settings;
pub mod stats;

pub use catalog::model::{ComparisonLayout, Orientation, SlotCardinality};
pub use catalog::resolver::{SlotResolution, resolve_slots};
pub use compose::resolve::{
    CaptureSink, ResolvedComposite, ResolvedOverlay, ResolvedSlot, resolve_composite,
    stats_row_count,
};
pub use foundation::core::{Canvas, Point, Rect, Size, Vec2, abs_day_span};
pub use foundation::error::{ReframeError, ReframeResult};
pub use overlay::geometry::{
    CanvasMetrics, date_chip_origins, default_overlay_origin, logo_origin, overlay_footprint,
    slot_frames, stats_bar_frame,
};
pub use overlay::model::{OverlayId, OverlayPositions};
pub use progress::model::{
    ImageRef, MeasurementEntry, MeasurementType, ProgressPhoto, SelectedPhotoSet, StrengthSummary,
    ViewType,
};
pub use progress::store::{MemoryStore, ProgressStore};
pub use session::editor::{ComparisonSession, RequestGate, SummaryProvider, SummaryRequest};
pub use settings::codec::{SettingsDoc, decode, decode_json, encode, encode_json};
pub use settings::model::{
    Background, ComparisonSettings, CompositeStyle, DateAlignment, ExportAspect, PhotoShape,
};
pub use stats::engine::{
    StatCategory, StatDatum, StatsInput, compute_stats, default_categories, format_day_span,
};
pub use stats::matcher::{DEFAULT_TOLERANCE_DAYS, find_closest, weight_for_photo};
