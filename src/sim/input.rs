//! Pointer position to catcher position

use serde::{Deserialize, Serialize};

use crate::consts::{CATCHER_MAX, CATCHER_MIN};

/// Horizontal extent of the playfield in client pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Playfield {
    pub left: f32,
    /// Zero until the host has measured it
    pub width: f32,
}

impl Playfield {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }

    /// Percent across the playfield, clamped to the catcher's travel range
    ///
    /// `None` when the playfield has no usable width.
    pub fn catcher_percent(&self, raw_x: f32) -> Option<f32> {
        if !self.is_measured() || !raw_x.is_finite() {
            return None;
        }
        let percent = (raw_x - self.left) / self.width * 100.0;
        Some(percent.clamp(CATCHER_MIN, CATCHER_MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_conversion() {
        let field = Playfield::new(100.0, 400.0);
        assert_eq!(field.catcher_percent(300.0), Some(50.0));
        assert_eq!(field.catcher_percent(180.0), Some(20.0));
    }

    #[test]
    fn test_clamped_to_travel_range() {
        let field = Playfield::new(0.0, 400.0);
        assert_eq!(field.catcher_percent(0.0), Some(5.0));
        assert_eq!(field.catcher_percent(-50.0), Some(5.0));
        assert_eq!(field.catcher_percent(400.0), Some(95.0));
        assert_eq!(field.catcher_percent(1e6), Some(95.0));
    }

    #[test]
    fn test_unmeasured_field_ignored() {
        assert_eq!(Playfield::default().catcher_percent(10.0), None);
        assert_eq!(Playfield::new(0.0, 400.0).catcher_percent(f32::NAN), None);
    }
}
