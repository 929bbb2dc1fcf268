//! Pointer selection to crop rectangle.

use serde::{Deserialize, Serialize};

use super::CropRect;

/// A pointer position in source-image pixel space.
///
/// Fractional and out-of-bounds values are expected: they come straight from
/// a drag on a scaled preview.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convert two drag points into a canonical crop rectangle.
///
/// The top-left corner is floored and the bottom-right corner is ceiled, so
/// every pixel the selection touches is included. The result is clamped into
/// `[0, image_width] x [0, image_height]`.
///
/// Degenerate selections (a click without a drag, or a drag entirely outside
/// the image) produce a zero-area rectangle; see [`CropRect::is_empty`].
/// NaN coordinates are treated as 0.
///
/// Both corners are clamped, including the top-left one, so a selection past
/// the right edge yields `x == image_width` with zero width and
/// `x + w <= image_width` always holds.
pub fn normalize(anchor: Point, endpoint: Point, image_width: u32, image_height: u32) -> CropRect {
    let (ax, ay) = (finite_or_zero(anchor.x), finite_or_zero(anchor.y));
    let (ex, ey) = (finite_or_zero(endpoint.x), finite_or_zero(endpoint.y));

    let min_x = ax.min(ex);
    let min_y = ay.min(ey);
    let max_x = ax.max(ex);
    let max_y = ay.max(ey);

    let x = min_x.floor().clamp(0.0, image_width as f64) as u32;
    let y = min_y.floor().clamp(0.0, image_height as f64) as u32;
    let x2 = max_x.ceil().clamp(0.0, image_width as f64) as u32;
    let y2 = max_y.ceil().clamp(0.0, image_height as f64) as u32;

    CropRect {
        x,
        y,
        w: x2.saturating_sub(x),
        h: y2.saturating_sub(y),
    }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_and_ceil() {
        let rect = normalize(Point::new(10.7, 20.2), Point::new(50.1, 60.9), 800, 600);
        assert_eq!(rect, CropRect::new(10, 20, 41, 41));
    }

    #[test]
    fn test_reversed_drag() {
        let forward = normalize(Point::new(100.0, 50.0), Point::new(700.0, 500.0), 800, 600);
        let backward = normalize(Point::new(700.0, 500.0), Point::new(100.0, 50.0), 800, 600);
        assert_eq!(forward, backward);
        assert_eq!(forward, CropRect::new(100, 50, 600, 450));
    }

    #[test]
    fn test_clamps_to_bounds() {
        let rect = normalize(Point::new(-25.0, -3.5), Point::new(900.0, 650.0), 800, 600);
        assert_eq!(rect, CropRect::new(0, 0, 800, 600));
    }

    #[test]
    fn test_click_without_drag_is_empty() {
        let rect = normalize(Point::new(42.0, 42.0), Point::new(42.0, 42.0), 800, 600);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_fractional_click_covers_one_pixel() {
        // Same fractional point: floor and ceil differ by one pixel
        let rect = normalize(Point::new(4.5, 4.5), Point::new(4.5, 4.5), 10, 10);
        assert_eq!(rect, CropRect::new(4, 4, 1, 1));
    }

    #[test]
    fn test_selection_outside_image_is_empty() {
        let rect = normalize(Point::new(900.0, 10.0), Point::new(1000.0, 100.0), 800, 600);
        assert_eq!(rect.x, 800);
        assert!(rect.is_empty());

        let rect = normalize(Point::new(-50.0, -50.0), Point::new(-10.0, -10.0), 800, 600);
        assert!(rect.is_empty());
    }

    #[test]
    fn test_nan_treated_as_zero() {
        let rect = normalize(Point::new(f64::NAN, f64::NAN), Point::new(10.0, 10.0), 100, 100);
        assert_eq!(rect, CropRect::new(0, 0, 10, 10));
    }

    #[test]
    fn test_zero_sized_image() {
        let rect = normalize(Point::new(0.0, 0.0), Point::new(10.0, 10.0), 0, 0);
        assert!(rect.is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-500.0f64..=2500.0, -500.0f64..=2500.0).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        /// Property: The rectangle always lies inside the image.
        #[test]
        fn prop_within_bounds(
            a in point_strategy(),
            b in point_strategy(),
            width in 0u32..=2000,
            height in 0u32..=2000,
        ) {
            let rect = normalize(a, b, width, height);
            prop_assert!(rect.x + rect.w <= width);
            prop_assert!(rect.y + rect.h <= height);
        }

        /// Property: Swapping anchor and endpoint gives the same rectangle.
        #[test]
        fn prop_order_independent(
            a in point_strategy(),
            b in point_strategy(),
            width in 1u32..=2000,
            height in 1u32..=2000,
        ) {
            prop_assert_eq!(normalize(a, b, width, height), normalize(b, a, width, height));
        }

        /// Property: Every in-bounds pixel touched by the drag is covered.
        #[test]
        fn prop_covers_selection(
            x1 in 0.0f64..=799.0,
            y1 in 0.0f64..=599.0,
            x2 in 0.0f64..=799.0,
            y2 in 0.0f64..=599.0,
        ) {
            let rect = normalize(Point::new(x1, y1), Point::new(x2, y2), 800, 600);
            prop_assert!(rect.x as f64 <= x1.min(x2));
            prop_assert!(rect.y as f64 <= y1.min(y2));
            prop_assert!((rect.x + rect.w) as f64 >= x1.max(x2));
            prop_assert!((rect.y + rect.h) as f64 >= y1.max(y2));
        }
    }
}
