use glam::Vec2;

use crate::camera::Viewport;

/// Drag-select rectangle in normalized device coordinates.
///
/// Only exists while a drag-select gesture is in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRect {
    /// Where the gesture started.
    pub start: Vec2,
    /// Latest pointer position.
    pub end: Vec2,
}

impl DragRect {
    /// Zero-size rectangle at `at`.
    #[must_use]
    pub fn new(at: Vec2) -> Self {
        Self { start: at, end: at }
    }

    /// Lower-left corner.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        self.start.min(self.end)
    }

    /// Upper-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.start.max(self.end)
    }

    /// Inclusive containment test on both axes.
    #[must_use]
    pub fn contains(&self, ndc: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        ndc.x >= min.x && ndc.x <= max.x && ndc.y >= min.y && ndc.y <= max.y
    }

    /// Whether the pointer never left the press point. A rectangle that is
    /// flat along one axis is still a valid selection line.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Axis-aligned pixel rectangle spanning both corners.
    #[must_use]
    pub fn pixel_rect(&self, viewport: Viewport) -> PixelRect {
        let a = viewport.ndc_to_pixel(self.start);
        let b = viewport.ndc_to_pixel(self.end);
        let top_left = a.min(b);
        let size = (a - b).abs();
        PixelRect {
            left: top_left.x,
            top: top_left.y,
            width: size.x,
            height: size.y,
        }
    }
}

/// Overlay rectangle in pixels, relative to the viewport's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl PixelRect {
    /// Zero-size rectangle anchored at a pixel position.
    #[must_use]
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            left: x,
            top: y,
            width: 0.0,
            height: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_inclusive_and_orientation_free() {
        let rect = DragRect {
            start: Vec2::new(0.3, -0.3),
            end: Vec2::new(-0.3, 0.3),
        };
        assert!(rect.contains(Vec2::ZERO));
        assert!(rect.contains(Vec2::new(0.3, 0.3)));
        assert!(rect.contains(Vec2::new(-0.3, -0.3)));
        assert!(!rect.contains(Vec2::new(0.31, 0.0)));
    }

    #[test]
    fn pixel_rect_spans_corners() {
        let vp = Viewport::new(800, 600);
        let rect = DragRect {
            start: vp.pixel_to_ndc(300.0, 100.0),
            end: vp.pixel_to_ndc(100.0, 250.0),
        };
        let px = rect.pixel_rect(vp);
        assert!((px.left - 100.0).abs() < 1e-3);
        assert!((px.top - 100.0).abs() < 1e-3);
        assert!((px.width - 200.0).abs() < 1e-3);
        assert!((px.height - 150.0).abs() < 1e-3);
    }

    #[test]
    fn fresh_rect_is_degenerate() {
        let rect = DragRect::new(Vec2::new(0.1, 0.2));
        assert!(rect.is_degenerate());
        assert_eq!(rect.pixel_rect(Viewport::new(10, 10)).width, 0.0);
    }

    #[test]
    fn flat_rect_is_not_degenerate() {
        let rect = DragRect {
            start: Vec2::new(0.1, -0.5),
            end: Vec2::new(0.1, 0.5),
        };
        assert!(!rect.is_degenerate());
        assert!(rect.contains(Vec2::new(0.1, 0.0)));
        assert!(!rect.contains(Vec2::new(0.11, 0.0)));
    }
}
