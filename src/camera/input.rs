use glam::Vec2;

use crate::camera::controller::CameraController;
use crate::input::{InputEvent, MouseButton};

/// Which pointer gesture is steering the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Rotate,
    Pan,
}

/// Translates pointer and wheel events into orbit controls: primary drag
/// rotates, secondary (or middle) drag pans, the wheel zooms.
///
/// Gating is left to the controller, so events keep flowing through here
/// while selection has the camera disabled.
#[derive(Debug, Clone, Default)]
pub struct CameraInput {
    last_pos: Option<Vec2>,
    gesture: Option<(Gesture, MouseButton)>,
}

impl CameraInput {
    /// Handler with no gesture in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the event was consumed by the camera.
    pub fn handle_event(
        &mut self,
        controller: &mut CameraController,
        event: &InputEvent,
    ) -> bool {
        match *event {
            InputEvent::PointerDown { button, x, y } => {
                // A second button pressed mid-gesture does not take over. The
                // same button again means its release was lost.
                if self.gesture.is_some_and(|(_, owner)| owner != button) {
                    return false;
                }
                self.last_pos = Some(Vec2::new(x, y));
                self.gesture = match button {
                    MouseButton::Left => Some(Gesture::Rotate),
                    MouseButton::Right | MouseButton::Middle => {
                        Some(Gesture::Pan)
                    }
                    MouseButton::Other(_) => None,
                }
                .map(|gesture| (gesture, button));
                self.gesture.is_some()
            }
            InputEvent::PointerUp { button, .. } => {
                if self.gesture.is_some_and(|(_, owner)| owner == button) {
                    self.gesture = None;
                    true
                } else {
                    false
                }
            }
            InputEvent::PointerMoved { x, y } => {
                let current = Vec2::new(x, y);
                let delta = self.last_pos.map_or(Vec2::ZERO, |p| current - p);
                self.last_pos = Some(current);
                match self.gesture {
                    Some((Gesture::Rotate, _)) => controller.rotate(delta),
                    Some((Gesture::Pan, _)) => controller.pan(delta),
                    None => return false,
                }
                true
            }
            InputEvent::Scroll { delta } => {
                controller.zoom(delta);
                true
            }
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } => false,
        }
    }

    /// Forget any gesture in flight.
    pub fn reset(&mut self) {
        self.gesture = None;
        self.last_pos = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn controller() -> CameraController {
        let opts = CameraOptions {
            damping: 0.0,
            ..CameraOptions::default()
        };
        CameraController::new(&opts, 1.0)
    }

    fn drag(input: &mut CameraInput, ctrl: &mut CameraController, button: MouseButton) {
        let _ = input.handle_event(ctrl, &InputEvent::PointerDown { button, x: 0.0, y: 0.0 });
        let _ = input.handle_event(ctrl, &InputEvent::PointerMoved { x: 40.0, y: 0.0 });
        let _ = input.handle_event(ctrl, &InputEvent::PointerUp { button, x: 40.0, y: 0.0 });
        let _ = ctrl.update(0.016);
    }

    #[test]
    fn primary_drag_rotates() {
        let mut ctrl = controller();
        let mut input = CameraInput::new();
        let before = *ctrl.camera();
        drag(&mut input, &mut ctrl, MouseButton::Left);
        assert_ne!(ctrl.camera().eye, before.eye);
        assert_eq!(ctrl.camera().target, before.target);
    }

    #[test]
    fn secondary_drag_pans() {
        let mut ctrl = controller();
        let mut input = CameraInput::new();
        let before = *ctrl.camera();
        drag(&mut input, &mut ctrl, MouseButton::Right);
        assert_ne!(ctrl.camera().target, before.target);
    }

    #[test]
    fn hover_does_not_move_camera() {
        let mut ctrl = controller();
        let mut input = CameraInput::new();
        let before = *ctrl.camera();
        assert!(!input.handle_event(&mut ctrl, &InputEvent::PointerMoved { x: 50.0, y: 50.0 }));
        let _ = ctrl.update(0.016);
        assert_eq!(*ctrl.camera(), before);
    }

    #[test]
    fn disabled_controller_swallows_drag() {
        let mut ctrl = controller();
        ctrl.disable();
        let mut input = CameraInput::new();
        let before = *ctrl.camera();
        drag(&mut input, &mut ctrl, MouseButton::Left);
        assert_eq!(*ctrl.camera(), before);
    }

    #[test]
    fn other_button_release_keeps_orbit_going() {
        let mut ctrl = controller();
        let mut input = CameraInput::new();
        let left = MouseButton::Left;
        let right = MouseButton::Right;
        let _ = input.handle_event(&mut ctrl, &InputEvent::PointerDown { button: left, x: 0.0, y: 0.0 });
        assert!(!input.handle_event(&mut ctrl, &InputEvent::PointerDown { button: right, x: 0.0, y: 0.0 }));
        assert!(!input.handle_event(&mut ctrl, &InputEvent::PointerUp { button: right, x: 0.0, y: 0.0 }));

        let before = *ctrl.camera();
        assert!(input.handle_event(&mut ctrl, &InputEvent::PointerMoved { x: 40.0, y: 0.0 }));
        let _ = ctrl.update(0.016);
        assert_ne!(ctrl.camera().eye, before.eye);
        assert_eq!(ctrl.camera().target, before.target);

        assert!(input.handle_event(&mut ctrl, &InputEvent::PointerUp { button: left, x: 40.0, y: 0.0 }));
        assert!(!input.handle_event(&mut ctrl, &InputEvent::PointerMoved { x: 80.0, y: 0.0 }));
    }

    #[test]
    fn repeated_press_restarts_a_gesture_with_a_lost_release() {
        let mut ctrl = controller();
        let mut input = CameraInput::new();
        let button = MouseButton::Right;
        let _ = input.handle_event(&mut ctrl, &InputEvent::PointerDown { button, x: 0.0, y: 0.0 });
        assert!(input.handle_event(&mut ctrl, &InputEvent::PointerDown { button, x: 100.0, y: 0.0 }));

        let before = *ctrl.camera();
        let _ = input.handle_event(&mut ctrl, &InputEvent::PointerMoved { x: 100.0, y: 0.0 });
        let _ = ctrl.update(0.016);
        assert_eq!(*ctrl.camera(), before, "delta measured from the new press");
    }
}
