use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in normalized image coordinates ([0,1] on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_normalized(&self) -> bool {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        in_unit(self.x)
            && in_unit(self.y)
            && in_unit(self.max_x())
            && in_unit(self.max_y())
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Clamps the rectangle into the unit square. In-range rectangles come
    /// back bit-for-bit unchanged; degenerate input collapses to a zero-sized
    /// rectangle instead of going negative.
    pub fn normalized(&self) -> Self {
        if self.is_normalized() {
            return *self;
        }
        let x0 = self.x.clamp(0.0, 1.0);
        let y0 = self.y.clamp(0.0, 1.0);
        let x1 = self.max_x().clamp(0.0, 1.0);
        let y1 = self.max_y().clamp(0.0, 1.0);
        Self {
            x: x0,
            y: y0,
            width: (x1 - x0).max(0.0),
            height: (y1 - y0).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps_to_unit_square() {
        let region = Region::new(-0.2, 0.5, 0.6, 0.8).normalized();
        assert_eq!(region.x, 0.0);
        assert_eq!(region.y, 0.5);
        assert!((region.width - 0.4).abs() < 1e-6);
        assert!((region.height - 0.5).abs() < 1e-6);
        assert!(region.is_normalized());
    }

    #[test]
    fn test_in_range_region_is_untouched() {
        let region = Region::new(0.1, 0.4, 0.5, 0.1);
        assert_eq!(region.normalized(), region);
        assert_eq!(region.normalized().height, 0.1);
    }

    #[test]
    fn test_negative_size_collapses() {
        let region = Region::new(0.5, 0.5, -0.1, 0.2);
        assert!(!region.is_normalized());
        let clamped = region.normalized();
        assert_eq!(clamped.width, 0.0);
        assert!(clamped.is_normalized());
    }
}
