//! Rounded-rectangle containment.

/// A rounded rectangle in continuous pixel coordinates.
///
/// Edges are inclusive: a point exactly on the boundary is inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    /// Corner radius, at most half the smaller side.
    pub radius: f32,
}

impl RoundedRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32, radius: f32) -> Self {
        let radius = radius.clamp(0.0, width.min(height) / 2.0);
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
            radius,
        }
    }

    /// Test whether the point (x, y) lies inside the shape.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if x < self.left || x > self.right || y < self.top || y > self.bottom {
            return false;
        }

        let r = self.radius;
        if r == 0.0 {
            return true;
        }

        // Inside the horizontal or vertical band of the cross
        let in_x_band = x >= self.left + r && x <= self.right - r;
        let in_y_band = y >= self.top + r && y <= self.bottom - r;
        if in_x_band || in_y_band {
            return true;
        }

        // In a corner square: compare against that corner's circle
        let cx = if x < self.left + r {
            self.left + r
        } else {
            self.right - r
        };
        let cy = if y < self.top + r {
            self.top + r
        } else {
            self.bottom - r
        };
        let dx = x - cx;
        let dy = y - cy;
        dx * dx + dy * dy <= r * r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sharp_rect() {
        let rect = RoundedRect::new(2.0, 2.0, 6.0, 4.0, 0.0);
        assert!(rect.contains(2.0, 2.0));
        assert!(rect.contains(8.0, 6.0));
        assert!(!rect.contains(1.9, 3.0));
        assert!(!rect.contains(5.0, 6.1));
    }

    #[test]
    fn test_corner_cut() {
        let rect = RoundedRect::new(0.0, 0.0, 100.0, 100.0, 20.0);
        // Corner tip is outside, point on the arc diagonal is inside
        assert!(!rect.contains(1.0, 1.0));
        assert!(!rect.contains(99.0, 99.0));
        assert!(rect.contains(20.0 - 14.0, 20.0 - 14.0));
        assert!(!rect.contains(20.0 - 14.5, 20.0 - 14.5));
    }

    #[test]
    fn test_bands_are_inside() {
        let rect = RoundedRect::new(0.0, 0.0, 100.0, 50.0, 20.0);
        assert!(rect.contains(50.0, 0.0));
        assert!(rect.contains(0.0, 25.0));
        assert!(rect.contains(100.0, 25.0));
    }

    #[test]
    fn test_radius_clamped_on_construction() {
        let rect = RoundedRect::new(0.0, 0.0, 10.0, 4.0, 100.0);
        assert_eq!(rect.radius, 2.0);
    }

    #[test]
    fn test_full_circle() {
        let rect = RoundedRect::new(0.0, 0.0, 10.0, 10.0, 5.0);
        assert!(rect.contains(5.0, 5.0));
        assert!(rect.contains(5.0, 0.0));
        assert!(!rect.contains(0.5, 0.5));
    }
}
