use super::drag::PixelRect;

/// Output boundary for the selection-rectangle overlay.
pub trait SelectionOverlay {
    /// Make the overlay visible at `rect`.
    fn show(&mut self, rect: PixelRect);
    /// Move/resize the visible overlay.
    fn resize(&mut self, rect: PixelRect);
    /// Hide the overlay.
    fn hide(&mut self);
}

/// Overlay state kept on the view and drawn by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayState {
    rect: Option<PixelRect>,
}

impl OverlayState {
    /// The visible rectangle, if any.
    #[must_use]
    pub fn rect(&self) -> Option<PixelRect> {
        self.rect
    }

    /// Whether the overlay is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.rect.is_some()
    }
}

impl SelectionOverlay for OverlayState {
    fn show(&mut self, rect: PixelRect) {
        self.rect = Some(rect);
    }

    fn resize(&mut self, rect: PixelRect) {
        if self.rect.is_some() {
            self.rect = Some(rect);
        }
    }

    fn hide(&mut self) {
        self.rect = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_requires_show() {
        let mut overlay = OverlayState::default();
        overlay.resize(PixelRect::at(1.0, 1.0));
        assert!(!overlay.is_visible());
        overlay.show(PixelRect::at(5.0, 6.0));
        overlay.resize(PixelRect {
            left: 5.0,
            top: 6.0,
            width: 10.0,
            height: 4.0,
        });
        assert_eq!(overlay.rect().map(|r| r.width), Some(10.0));
        overlay.hide();
        assert_eq!(overlay.rect(), None);
    }
}
