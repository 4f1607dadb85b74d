use glam::Vec2;

/// Result of processing a primary-button release through the click tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ClickResult {
    /// No click (drag, suppressed press, or no matching press).
    NoAction,
    /// A click at the release position.
    Click {
        /// Release position in physical pixels.
        position: Vec2,
    },
}

/// Decides whether a primary press + release is a click.
///
/// A press becomes a drag once the pointer travels more than `threshold`
/// pixels from where it went down. A press can also be suppressed outright,
/// which the selection engine does when the press starts a drag-select.
#[derive(Debug, Clone)]
pub(crate) struct ClickTracker {
    threshold: f32,
    press_pos: Option<Vec2>,
    is_dragging: bool,
    suppressed: bool,
}

impl ClickTracker {
    pub(crate) fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.max(0.0),
            press_pos: None,
            is_dragging: false,
            suppressed: false,
        }
    }

    pub(crate) fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold.max(0.0);
    }

    /// Record a primary press.
    pub(crate) fn press(&mut self, position: Vec2) {
        self.press_pos = Some(position);
        self.is_dragging = false;
        self.suppressed = false;
    }

    /// The current press will never produce a click.
    pub(crate) fn suppress(&mut self) {
        self.suppressed = true;
    }

    /// Whether a press is in flight.
    pub(crate) fn is_pressed(&self) -> bool {
        self.press_pos.is_some()
    }

    /// Whether the in-flight press has turned into a drag.
    pub(crate) fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Track pointer motion.
    pub(crate) fn motion(&mut self, position: Vec2) {
        if let Some(start) = self.press_pos {
            if start.distance(position) > self.threshold {
                self.is_dragging = true;
            }
        }
    }

    /// Process a primary release and say whether it completed a click.
    pub(crate) fn release(&mut self, position: Vec2) -> ClickResult {
        self.motion(position);
        let was_pressed = self.press_pos.take().is_some();
        let result = if was_pressed && !self.is_dragging && !self.suppressed {
            ClickResult::Click { position }
        } else {
            ClickResult::NoAction
        };
        self.is_dragging = false;
        self.suppressed = false;
        result
    }

    /// Drop any in-flight press.
    pub(crate) fn reset(&mut self) {
        self.press_pos = None;
        self.is_dragging = false;
        self.suppressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_press_is_a_click() {
        let mut clicks = ClickTracker::new(4.0);
        clicks.press(Vec2::new(10.0, 10.0));
        clicks.motion(Vec2::new(12.0, 11.0));
        assert_eq!(
            clicks.release(Vec2::new(12.0, 11.0)),
            ClickResult::Click {
                position: Vec2::new(12.0, 11.0)
            }
        );
    }

    #[test]
    fn moving_past_threshold_is_a_drag() {
        let mut clicks = ClickTracker::new(4.0);
        clicks.press(Vec2::new(10.0, 10.0));
        clicks.motion(Vec2::new(30.0, 10.0));
        assert!(clicks.is_dragging());
        // Coming back to the start does not turn it into a click again.
        assert_eq!(clicks.release(Vec2::new(10.0, 10.0)), ClickResult::NoAction);
    }

    #[test]
    fn release_jump_counts_as_drag() {
        let mut clicks = ClickTracker::new(4.0);
        clicks.press(Vec2::ZERO);
        assert_eq!(clicks.release(Vec2::new(50.0, 0.0)), ClickResult::NoAction);
    }

    #[test]
    fn suppressed_press_never_clicks() {
        let mut clicks = ClickTracker::new(4.0);
        clicks.press(Vec2::ZERO);
        clicks.suppress();
        assert_eq!(clicks.release(Vec2::ZERO), ClickResult::NoAction);
        // Next press is independent.
        clicks.press(Vec2::ZERO);
        assert!(matches!(clicks.release(Vec2::ZERO), ClickResult::Click { .. }));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut clicks = ClickTracker::new(4.0);
        assert_eq!(clicks.release(Vec2::ZERO), ClickResult::NoAction);
    }
}
