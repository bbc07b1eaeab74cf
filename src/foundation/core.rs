use chrono::{DateTime, Utc};

use crate::foundation::error::{ReframeError, ReframeResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Logical editing canvas in pixels. Overlay and slot geometry is
/// computed against these bounds; the capture collaborator maps them to
/// its output resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> ReframeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReframeError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Absolute whole-day span between two timestamps (truncated, not
/// rounded; 47 hours apart is 1 day).
pub fn abs_day_span(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (b - a).num_days().abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn canvas_rejects_zero_dims() {
        assert!(Canvas::new(0, 100).is_err());
        assert!(Canvas::new(100, 0).is_err());
        assert!(Canvas::new(1080, 1350).is_ok());
    }

    #[test]
    fn day_span_is_symmetric_and_truncated() {
        let a = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2024, 1, 3, 7, 0, 0).unwrap();
        assert_eq!(abs_day_span(a, b), 1);
        assert_eq!(abs_day_span(b, a), 1);

        let c = Utc.with_ymd_and_hms(2024, 3, 11, 8, 0, 0).unwrap();
        assert_eq!(abs_day_span(a, c), 70);
    }
}
