use glam::Vec2;

/// Live viewport size in physical pixels.
///
/// Queried per event rather than cached, since the surface can resize
/// between events. Conversions clamp a zero dimension to one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
}

impl Viewport {
    /// Viewport of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn dims(self) -> Vec2 {
        Vec2::new(self.width.max(1) as f32, self.height.max(1) as f32)
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(self) -> f32 {
        let d = self.dims();
        d.x / d.y
    }

    /// Pixel position (top-left origin, y down) to NDC (y up).
    #[must_use]
    pub fn pixel_to_ndc(self, px: f32, py: f32) -> Vec2 {
        let d = self.dims();
        Vec2::new((px / d.x) * 2.0 - 1.0, -(py / d.y) * 2.0 + 1.0)
    }

    /// NDC back to a top-left-anchored pixel position.
    #[must_use]
    pub fn ndc_to_pixel(self, ndc: Vec2) -> Vec2 {
        let d = self.dims();
        Vec2::new((ndc.x + 1.0) * d.x * 0.5, (1.0 - ndc.y) * d.y * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_ndc_extremes() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.pixel_to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.pixel_to_ndc(800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(vp.pixel_to_ndc(400.0, 300.0), Vec2::ZERO);
    }

    #[test]
    fn outside_pointer_yields_out_of_range_ndc() {
        let vp = Viewport::new(100, 100);
        let ndc = vp.pixel_to_ndc(-50.0, 150.0);
        assert_eq!(ndc, Vec2::new(-2.0, -2.0));
    }

    #[test]
    fn ndc_to_pixel_inverts_pixel_to_ndc() {
        let vp = Viewport::new(1024, 768);
        let px = Vec2::new(123.0, 456.0);
        let back = vp.ndc_to_pixel(vp.pixel_to_ndc(px.x, px.y));
        assert!((back - px).length() < 1e-3);
    }

    #[test]
    fn zero_size_is_clamped() {
        let vp = Viewport::new(0, 0);
        assert_eq!(vp.aspect(), 1.0);
        assert!(vp.pixel_to_ndc(0.0, 0.0).is_finite());
    }
}
