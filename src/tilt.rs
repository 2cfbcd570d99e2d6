//! Card tilt-on-hover.
//!
//! Cards lean toward the pointer: up to 6 degrees around each axis at the
//! card's edges, flat at its center.

use glam::Vec2;

/// Rotation at the card edge, in degrees.
pub const MAX_TILT_DEG: f32 = 6.0;
/// CSS perspective distance, in pixels.
pub const PERSPECTIVE_PX: f32 = 800.0;
/// Lift applied while hovered, in pixels.
pub const LIFT_PX: f32 = 4.0;

/// Axis-aligned rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }
}

/// Rotation of a hovered card, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

impl Tilt {
    /// Tilt for `pointer` over `rect`. Degenerate rects do not tilt.
    pub fn from_pointer(rect: Rect, pointer: Vec2) -> Self {
        let center = rect.size / 2.0;
        if center.x <= 0.0 || center.y <= 0.0 || !pointer.is_finite() {
            return Self::default();
        }

        let local = pointer - rect.origin;
        Self {
            rotate_x: ((local.y - center.y) / center.y) * -MAX_TILT_DEG,
            rotate_y: ((local.x - center.x) / center.x) * MAX_TILT_DEG,
        }
    }

    /// CSS `transform` value for this tilt.
    pub fn css_transform(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateY(-{}px)",
            PERSPECTIVE_PX, self.rotate_x, self.rotate_y, LIFT_PX
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_flat() {
        let rect = Rect::new(100.0, 50.0, 200.0, 100.0);
        let tilt = Tilt::from_pointer(rect, Vec2::new(200.0, 100.0));
        assert!(tilt.rotate_x.abs() < 1e-6);
        assert!(tilt.rotate_y.abs() < 1e-6);
    }

    #[test]
    fn test_corners_reach_max_tilt() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);

        let top_left = Tilt::from_pointer(rect, Vec2::new(0.0, 0.0));
        assert!((top_left.rotate_x - 6.0).abs() < 1e-6);
        assert!((top_left.rotate_y + 6.0).abs() < 1e-6);

        let bottom_right = Tilt::from_pointer(rect, Vec2::new(200.0, 100.0));
        assert!((bottom_right.rotate_x + 6.0).abs() < 1e-6);
        assert!((bottom_right.rotate_y - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_rect_does_not_tilt() {
        let rect = Rect::new(0.0, 0.0, 0.0, 100.0);
        assert_eq!(Tilt::from_pointer(rect, Vec2::new(5.0, 5.0)), Tilt::default());
    }

    #[test]
    fn test_css_transform() {
        let tilt = Tilt {
            rotate_x: -3.0,
            rotate_y: 1.5,
        };
        assert_eq!(
            tilt.css_transform(),
            "perspective(800px) rotateX(-3deg) rotateY(1.5deg) translateY(-4px)"
        );
    }
}
