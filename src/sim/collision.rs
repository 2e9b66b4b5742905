//! Catch detection
//!
//! The diver's capture region is a rectangle in playfield percentages: its
//! horizontal extent comes from the sprite's pixel width, its vertical extent
//! is a band around the catch line.

use glam::Vec2;

use super::state::FallingObject;
use crate::tuning::Tuning;

/// Area in which an object counts as caught
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRegion {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl CaptureRegion {
    /// Region centered on `catcher_pos` for a playfield `width_px` wide
    ///
    /// A width of zero (not yet measured) uses the tuning default.
    pub fn around(catcher_pos: f32, width_px: f32, tuning: &Tuning) -> Self {
        let width_px = effective_width(width_px, tuning.default_playfield_width_px);
        let half = (tuning.catcher_width_px / 2.0) / width_px * 100.0;
        Self {
            left: catcher_pos - half - tuning.catch_margin,
            right: catcher_pos + half + tuning.catch_margin,
            top: tuning.catch_line - tuning.catch_band_above,
            bottom: tuning.catch_line + tuning.catch_band_below,
        }
    }

    /// Inclusive on every edge
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.y >= self.top && pos.y <= self.bottom && pos.x >= self.left && pos.x <= self.right
    }
}

/// Playfield width to divide by, never zero
pub fn effective_width(width_px: f32, fallback: f32) -> f32 {
    if width_px.is_finite() && width_px > 0.0 {
        width_px
    } else {
        fallback
    }
}

/// Whether `object`, at its current position, is inside the catcher's region
///
/// Callers advance the object for the tick first.
pub fn intersects(object: &FallingObject, catcher_pos: f32, width_px: f32, tuning: &Tuning) -> bool {
    CaptureRegion::around(catcher_pos, width_px, tuning).contains(object.pos())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32) -> FallingObject {
        FallingObject::new(0, x, y, 1.0, 0.0)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_band_edges_inclusive() {
        let tuning = Tuning::default();
        assert!(intersects(&at(50.0, 70.0), 50.0, 400.0, &tuning));
        assert!(intersects(&at(50.0, 85.0), 50.0, 400.0, &tuning));
        assert!(!intersects(&at(50.0, 69.9), 50.0, 400.0, &tuning));
        assert!(!intersects(&at(50.0, 85.1), 50.0, 400.0, &tuning));
    }

    #[test]
    fn test_horizontal_extent() {
        let tuning = Tuning::default();
        // 400 px field: half width 15%, plus 5% margin
        let region = CaptureRegion::around(50.0, 400.0, &tuning);
        assert!(approx(region.left, 30.0));
        assert!(approx(region.right, 70.0));
        assert!(intersects(&at(30.01, 75.0), 50.0, 400.0, &tuning));
        assert!(intersects(&at(69.99, 75.0), 50.0, 400.0, &tuning));
        assert!(!intersects(&at(29.5, 75.0), 50.0, 400.0, &tuning));
    }

    #[test]
    fn test_wider_field_narrows_region() {
        let tuning = Tuning::default();
        // 1200 px field: half width 5%, plus 5% margin
        let region = CaptureRegion::around(50.0, 1200.0, &tuning);
        assert!(approx(region.left, 40.0));
        assert!(approx(region.right, 60.0));
        assert!(!intersects(&at(35.0, 75.0), 50.0, 1200.0, &tuning));
    }

    #[test]
    fn test_unmeasured_width_falls_back() {
        let tuning = Tuning::default();
        let fallback = CaptureRegion::around(50.0, 400.0, &tuning);
        assert_eq!(CaptureRegion::around(50.0, 0.0, &tuning), fallback);
        assert_eq!(CaptureRegion::around(50.0, -3.0, &tuning), fallback);
        assert_eq!(CaptureRegion::around(50.0, f32::NAN, &tuning), fallback);
    }

    #[test]
    fn test_catch_zone_boundary_ticks() {
        let tuning = Tuning::default();
        let mut obj = FallingObject::new(0, 50.0, -10.0, 5.0, 0.0);
        for _ in 0..15 {
            obj.advance();
        }
        assert_eq!(obj.y(), 65.0);
        assert!(!intersects(&obj, 50.0, 400.0, &tuning));

        obj.advance();
        assert_eq!(obj.y(), 70.0);
        assert!(intersects(&obj, 50.0, 400.0, &tuning));

        obj.advance();
        assert_eq!(obj.y(), 75.0);
        assert!(intersects(&obj, 50.0, 400.0, &tuning));
    }
}
